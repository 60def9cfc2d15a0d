// src/table/mod.rs

//! A dynamic table drawn on a [`Console`].
//!
//! The table partitions the top rows of the console's framebuffer into
//! columns separated by a divider glyph. Each [`TableCell`] remembers its
//! content and colors and holds back-references (row/column indices) to the
//! framebuffer cells it covers; it never owns those cells.
//!
//! A table is tied to the framebuffer generation it was laid out against.
//! After the console is resized every operation except [`Table::reflow`]
//! fails with [`Error::StaleLayout`] until the table is reflowed.

mod content;
mod layout;
mod mutate;

#[cfg(test)]
mod tests;

pub use layout::{usable_width, ColumnLayout, ColumnSpan};

use log::{debug, info};

use crate::backends::TerminalBackend;
use crate::color::{Background, Foreground};
use crate::console::{Console, FramebufferVersion};
use crate::error::{Error, Result};

/// Position of a framebuffer cell referenced by a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// One cell of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    size: usize,
    content: String,
    fg: Foreground,
    bg: Background,
    /// One entry per covered framebuffer column; `None` where the position
    /// falls outside the console.
    refs: Vec<Option<CellRef>>,
}

impl TableCell {
    /// A cell of table column `col` on row `row`, filled with `size` blanks.
    fn blank(
        layout: &ColumnLayout,
        row: usize,
        col: usize,
        console_size: (usize, usize),
        fill: char,
        fg: Foreground,
        bg: Background,
    ) -> Self {
        let size = layout.size(col);
        TableCell {
            size,
            content: std::iter::repeat(fill).take(size).collect(),
            fg,
            bg,
            refs: layout.map_row(col, row, console_size.0, console_size.1),
        }
    }

    /// Width in framebuffer cells; zero for a degenerate column.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn fg(&self) -> Foreground {
        self.fg
    }

    pub fn bg(&self) -> Background {
        self.bg
    }

    pub fn refs(&self) -> &[Option<CellRef>] {
        &self.refs
    }

    pub fn is_degenerate(&self) -> bool {
        self.size == 0
    }
}

#[derive(Debug)]
pub struct Table {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<TableCell>>,
    layout: ColumnLayout,
    version: FramebufferVersion,
}

impl Table {
    /// Lays out a `rows x cols` table over `console`, draws the separators
    /// and fills every cell with blanks in the configured table colors.
    pub fn new<B: TerminalBackend>(
        console: &mut Console<B>,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        if cols == 0 {
            return Err(Error::InvalidShape { rows, cols });
        }
        let mut table = Table {
            rows,
            cols: 0,
            cells: Vec::new(),
            layout: ColumnLayout::compute(console.cols(), 0),
            version: console.version(),
        };
        table.rebuild(console, cols, vec![Vec::new(); rows])?;
        info!(
            "Table created: {}x{} over {} usable cells",
            cols,
            rows,
            table.layout.usable_width()
        );
        Ok(table)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Framebuffer generation the back-references were built against.
    pub fn version(&self) -> FramebufferVersion {
        self.version
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&TableCell> {
        self.check_bounds(row, col)?;
        Ok(&self.cells[row][col])
    }

    /// Blanks every table cell on screen and renders. Stored content is kept,
    /// so [`Table::redraw`] brings it back.
    pub fn clear<B: TerminalBackend>(
        &self,
        console: &mut Console<B>,
        wait_for_key: bool,
    ) -> Result<()> {
        self.ensure_current(console)?;
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.blank_cell(console, row, col)?;
            }
        }
        console.render(wait_for_key)?;
        Ok(())
    }

    /// Repaints separators and every cell from stored content, then renders.
    pub fn redraw<B: TerminalBackend>(
        &self,
        console: &mut Console<B>,
        wait_for_key: bool,
    ) -> Result<()> {
        self.ensure_current(console)?;
        for row in 0..self.rows {
            self.paint_row(console, row)?;
        }
        console.render(wait_for_key)?;
        Ok(())
    }

    /// Lists, per cell, the glyphs currently in the referenced framebuffer
    /// cells. Separator glyphs are flagged with `|SEP`; unmapped positions
    /// show as `?`.
    pub fn debug_dump<B: TerminalBackend>(&self, console: &Console<B>) -> Result<String> {
        self.ensure_current(console)?;
        let separator = console.config().appearance.separator_glyph;
        let mut out = String::from("=== Table Debug Start ===\n");
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                out.push_str(&format!("Cell [{},{}], size={}: ", r, c, cell.size));
                for slot in &cell.refs {
                    let ch = match slot {
                        Some(pos) => console.cell(pos.row, pos.col)?.c,
                        None => '?',
                    };
                    if ch == separator {
                        out.push_str(&format!("[{}|SEP] ", ch));
                    } else {
                        out.push(ch);
                        out.push(' ');
                    }
                }
                out.push('\n');
            }
        }
        out.push_str("=== Table Debug End ===\n");
        debug!("{}", out);
        Ok(out)
    }

    /// Tears the table down. The console's framebuffer is left as it is.
    pub fn remove(self) {
        info!("Removing {}x{} table", self.cols, self.rows);
    }

    fn ensure_current<B: TerminalBackend>(&self, console: &Console<B>) -> Result<()> {
        if self.version != console.version() {
            return Err(Error::StaleLayout {
                table: self.version,
                console: console.version(),
            });
        }
        Ok(())
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Draws the separators of framebuffer row `row` and replays its cells.
    fn paint_row<B: TerminalBackend>(&self, console: &mut Console<B>, row: usize) -> Result<()> {
        if row < console.rows() {
            let glyph = console.config().appearance.separator_glyph;
            let (fg, bg) = {
                let colors = &console.config().colors;
                (colors.separator_foreground, colors.separator_background)
            };
            for &sep in self.layout.separators() {
                if sep < console.cols() {
                    console.set_cell(row, sep, fg, bg, glyph)?;
                }
            }
        }
        for col in 0..self.cols {
            self.replay_cell(console, row, col)?;
        }
        Ok(())
    }
}
