//! Single-character console commands.
//!
//! | Byte | Command    |
//! |------|------------|
//! | `M`  | `Menu`     |
//! | `Q`  | `Quit`     |
//! | `w`  | `Increase` |
//! | `s`  | `Decrease` |
//! | `x`  | `Reset`    |
//! | `e`  | `End`      |
//!
//! Matching is case-sensitive; every other byte is a no-op.

/// Commands the operator can send over the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the menu.
    Menu,
    /// Leave the main loop.
    Quit,
    /// One step clockwise.
    Increase,
    /// One step counter-clockwise.
    Decrease,
    /// Back to the start pulse.
    Reset,
    /// Straight to the end pulse.
    End,
}

impl Command {
    /// Decode a received byte; `None` for anything unrecognized.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'M' => Some(Self::Menu),
            b'Q' => Some(Self::Quit),
            b'w' => Some(Self::Increase),
            b's' => Some(Self::Decrease),
            b'x' => Some(Self::Reset),
            b'e' => Some(Self::End),
            _ => None,
        }
    }
}
