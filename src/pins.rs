//! GPIO / peripheral pin assignments for the servo rig carrier board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH)
// ---------------------------------------------------------------------------

/// LED 1: lit while the rig is initialising.
pub const LED1_GPIO: i32 = 38;
pub const LED2_GPIO: i32 = 39;
pub const LED3_GPIO: i32 = 40;
/// LED 4: heartbeat, toggled from the tick context.
pub const LED4_GPIO: i32 = 41;

/// All indicator pins, in LED-number order.
pub const LED_GPIOS: [i32; 4] = [LED1_GPIO, LED2_GPIO, LED3_GPIO, LED4_GPIO];

// ---------------------------------------------------------------------------
// Push-buttons (active LOW, internal pull-up)
// ---------------------------------------------------------------------------

pub const LEFT_BUTTON_GPIO: i32 = 0;
pub const RIGHT_BUTTON_GPIO: i32 = 14;

// ---------------------------------------------------------------------------
// Servo pair (LEDC PWM)
// ---------------------------------------------------------------------------

pub const SERVO_1_GPIO: i32 = 4;
pub const SERVO_2_GPIO: i32 = 5;

/// LEDC duty resolution for the servo timer.  At 50 Hz a 14-bit counter
/// gives a 16384-tick period, the finest the ESP32-S3 LEDC allows.
pub const SERVO_LEDC_RESOLUTION_BITS: u32 = 14;

// ---------------------------------------------------------------------------
// Console (UART0, shared with the boot log)
// ---------------------------------------------------------------------------

pub const CONSOLE_UART_NUM: i32 = 0;
pub const CONSOLE_TX_GPIO: i32 = 43;
pub const CONSOLE_RX_GPIO: i32 = 44;
/// Receive ring size handed to the UART driver.
pub const CONSOLE_RX_BUFFER: i32 = 256;

/// Console receive poll period.  The poll timer stands in for the UART
/// receive interrupt and deposits at most one byte per call.
pub const CONSOLE_POLL_PERIOD_US: u64 = 2_000;
