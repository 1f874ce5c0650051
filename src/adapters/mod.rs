//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                     |
//! |------------|---------------|---------------------------------|
//! | `hardware` | SystemPort    | esp_timer, interrupt mask       |
//! |            | IndicatorPort | ESP32 GPIO (LED1–4)             |
//! |            | ButtonPort    | ESP32 GPIO (left/right buttons) |
//! |            | ConsolePort   | UART0                           |
//! |            | ServoPort     | LEDC timer 0, channels 0–1      |
//! | `log_sink` | EventSink     | Serial log output               |

pub mod hardware;
pub mod log_sink;
