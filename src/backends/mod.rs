// src/backends/mod.rs

//! Declares backend modules and defines the terminal capability the console draws through.

pub mod console;
pub mod headless;

pub use console::ConsoleBackend;
pub use headless::{Frame, HeadlessBackend};

use anyhow::Result;

use crate::cell::Cell;
use crate::color::{Background, Foreground};
use crate::keys::KeySymbol;

/// Snapshot of the terminal taken when a console is created.
///
/// `saved` is whatever the backend needs to put the terminal back; the
/// console never looks inside it.
#[derive(Debug, Clone)]
pub struct OriginalState<S> {
    /// Colors the terminal was drawing with; used to fill a fresh framebuffer.
    pub default_fg: Foreground,
    pub default_bg: Background,
    pub cursor_visible: bool,
    pub saved: S,
}

/// The terminal I/O primitives a `Console` needs.
///
/// Implementations deal in structured cells only; escape sequences and
/// platform calls stay behind this trait.
pub trait TerminalBackend {
    /// Backend-specific terminal state captured at creation.
    type Saved;

    /// Current visible size as `(rows, cols)`.
    fn size(&self) -> Result<(usize, usize)>;

    /// Captures the terminal state so it can be restored later, and puts the
    /// terminal into the mode the console draws in.
    fn capture_original_state(&mut self) -> Result<OriginalState<Self::Saved>>;

    fn restore_original_state(&mut self, state: &OriginalState<Self::Saved>) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    /// Moves the terminal cursor to the top-left corner.
    fn home_cursor(&mut self) -> Result<()>;

    /// Writes a full frame. `cells` is row-major and holds exactly
    /// `width * height` entries. Must reach the screen as a single write.
    fn write_grid(&mut self, cells: &[Cell], width: usize, height: usize) -> Result<()>;

    /// Blocks the calling thread until one key is pressed.
    fn read_key_blocking(&mut self) -> Result<KeySymbol>;
}
