// src/cell.rs

//! Defines the `Cell` type, the smallest addressable unit of a framebuffer.

use std::fmt;

use crate::color::{Background, Foreground};

/// One character plus its foreground/background attributes.
///
/// A `Cell` has no identity beyond its position in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character displayed in the cell.
    pub c: char,
    pub fg: Foreground,
    pub bg: Background,
}

impl Cell {
    pub const fn new(c: char, fg: Foreground, bg: Background) -> Self {
        Cell { c, fg, bg }
    }

    /// A space drawn in the given colors. Used to initialize and wipe cells.
    pub const fn blank(fg: Foreground, bg: Background) -> Self {
        Cell { c: ' ', fg, bg }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(Foreground::default(), Background::default())
    }
}

// Prints only the character, not its attributes.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.c)
    }
}
