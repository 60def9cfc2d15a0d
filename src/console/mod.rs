// src/console/mod.rs

//! The `Console`: owner of the framebuffer and of the terminal's original state.
//!
//! A console is created from a live terminal, mutated cell by cell (directly
//! or through a [`Table`](crate::table::Table)), and made visible with
//! [`Console::render`], which hands the whole framebuffer to the backend in
//! one write. Dropping the console restores the terminal if [`Console::reset`]
//! was not called explicitly; either way restoration happens once.

mod framebuffer;


pub use framebuffer::{Framebuffer, FramebufferVersion};

use log::{debug, error, info, trace, warn};

use crate::backends::{OriginalState, TerminalBackend};
use crate::cell::Cell;
use crate::color::{Background, Foreground};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::keys::KeySymbol;

pub struct Console<B: TerminalBackend> {
    backend: B,
    config: Config,
    cursor_visible: bool,
    original: OriginalState<B::Saved>,
    framebuffer: Framebuffer,
    restored: bool,
}

impl<B: TerminalBackend> Console<B> {
    /// Creates a console with the default configuration.
    pub fn new(backend: B) -> Result<Self> {
        Self::with_config(backend, Config::default())
    }

    /// Reads the terminal size, captures its original state and allocates a
    /// framebuffer filled with spaces in the terminal's default colors.
    pub fn with_config(mut backend: B, config: Config) -> Result<Self> {
        let (rows, cols) = match backend.size() {
            Ok((rows, cols)) if rows > 0 && cols > 0 => (rows, cols),
            Ok((rows, cols)) => {
                return Err(Error::SizeQuery(format!(
                    "terminal reported {}x{} cells",
                    cols, rows
                )))
            }
            Err(e) => return Err(Error::SizeQuery(format!("{:#}", e))),
        };

        let original = backend
            .capture_original_state()
            .map_err(|e| Error::InvalidHandle(format!("{:#}", e)))?;

        let fill = Cell::blank(original.default_fg, original.default_bg);
        let framebuffer = Framebuffer::new(rows, cols, fill);
        info!(
            "Console created: {}x{} cells ({:?})",
            cols,
            rows,
            framebuffer.version()
        );

        let hide_cursor = config.console.hide_cursor;
        let mut console = Console {
            backend,
            config,
            cursor_visible: original.cursor_visible,
            original,
            framebuffer,
            restored: false,
        };
        // From here on a failure drops `console`, which restores the terminal.
        if hide_cursor {
            console.set_cursor_visible(false)?;
        }
        Ok(console)
    }

    pub fn rows(&self) -> usize {
        self.framebuffer.rows()
    }

    pub fn cols(&self) -> usize {
        self.framebuffer.cols()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub(crate) fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn version(&self) -> FramebufferVersion {
        self.framebuffer.version()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// A space in the terminal's default colors.
    pub fn default_cell(&self) -> Cell {
        Cell::blank(self.original.default_fg, self.original.default_bg)
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        self.framebuffer.get(row, col)
    }

    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        fg: Foreground,
        bg: Background,
        c: char,
    ) -> Result<()> {
        *self.framebuffer.get_mut(row, col)? = Cell::new(c, fg, bg);
        Ok(())
    }

    /// Recolors one cell, keeping its character.
    pub fn set_cell_colors(
        &mut self,
        row: usize,
        col: usize,
        fg: Foreground,
        bg: Background,
    ) -> Result<()> {
        let cell = self.framebuffer.get_mut(row, col)?;
        cell.fg = fg;
        cell.bg = bg;
        Ok(())
    }

    /// Blanks every cell to the default colors and renders.
    pub fn clear(&mut self) -> Result<()> {
        let fill = self.default_cell();
        self.framebuffer.fill(fill);
        self.render(false)?;
        Ok(())
    }

    /// Writes the whole framebuffer to the terminal in one call.
    ///
    /// With `wait_for_key`, blocks for one keypress afterwards and returns it.
    pub fn render(&mut self, wait_for_key: bool) -> Result<Option<KeySymbol>> {
        trace!(
            "Rendering {}x{} framebuffer",
            self.framebuffer.cols(),
            self.framebuffer.rows()
        );
        self.backend.write_grid(
            self.framebuffer.cells(),
            self.framebuffer.cols(),
            self.framebuffer.rows(),
        )?;
        if !wait_for_key {
            return Ok(None);
        }
        let key = self.backend.read_key_blocking()?;
        debug!("Render wait ended with {:?}", key);
        Ok(Some(key))
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.backend.set_cursor_visible(visible)?;
        self.cursor_visible = visible;
        Ok(())
    }

    pub fn toggle_cursor(&mut self) -> Result<()> {
        self.set_cursor_visible(!self.cursor_visible)
    }

    /// Re-queries the terminal size and, if it changed, reallocates and
    /// repaints the (now blank) framebuffer.
    ///
    /// Returns `true` when the size changed. Any table drawn on this console
    /// must be reflowed before it can be used again.
    pub fn resize(&mut self) -> Result<bool> {
        let (rows, cols) = self.backend.size()?;
        if rows == 0 || cols == 0 {
            return Err(Error::SizeQuery(format!(
                "terminal reported {}x{} cells",
                cols, rows
            )));
        }
        if rows == self.rows() && cols == self.cols() {
            return Ok(false);
        }
        info!(
            "Console resized from {}x{} to {}x{}",
            self.cols(),
            self.rows(),
            cols,
            rows
        );
        let fill = self.default_cell();
        self.framebuffer.reallocate(rows, cols, fill);
        self.render(false)?;
        Ok(true)
    }

    /// Puts the terminal back the way it was found: original attributes and
    /// mode, a cleared screen, original cursor visibility, cursor at the origin.
    ///
    /// Only the first call does anything; later calls (including the one made
    /// on drop) are no-ops.
    pub fn reset(&mut self) -> Result<()> {
        if self.restored {
            warn!("Console::reset called on an already restored console");
            return Ok(());
        }
        self.restored = true;
        info!("Resetting console to its original state");
        self.backend.restore_original_state(&self.original)?;
        self.clear()?;
        let visible = self.original.cursor_visible;
        self.set_cursor_visible(visible)?;
        self.backend.home_cursor()?;
        Ok(())
    }
}

impl<B: TerminalBackend> Drop for Console<B> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        debug!("Console dropped without reset, restoring terminal");
        if let Err(e) = self.reset() {
            error!("Console: Error during reset in drop: {}", e);
        }
    }
}
