// src/keys.rs

use serde::{Deserialize, Serialize};

/// A single keypress, as returned by a blocking key read.
///
/// Only the first byte of a multi-byte sequence is decoded; escape
/// sequences (arrows, function keys) arrive as `Escape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySymbol {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    /// A control byte with no dedicated symbol (e.g. Ctrl-C arrives as `Control(0x03)`).
    Control(u8),
}

impl KeySymbol {
    /// Decodes the first byte of a raw-mode read.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'\r' | b'\n' => KeySymbol::Enter,
            b'\t' => KeySymbol::Tab,
            0x08 | 0x7f => KeySymbol::Backspace,
            0x1b => KeySymbol::Escape,
            0x00..=0x1f => KeySymbol::Control(byte),
            // Non-ASCII lead bytes are passed through as their Latin-1 value.
            _ => KeySymbol::Char(byte as char),
        }
    }
}
