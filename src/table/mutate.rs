// src/table/mutate.rs

//! Structural changes: reflow after a resize, adding and removing rows and columns.

use log::{debug, info};

use super::{ColumnLayout, Table, TableCell};
use crate::backends::TerminalBackend;
use crate::color::{Background, Foreground};
use crate::console::Console;
use crate::error::{Error, Result};

/// Content and colors of one cell, carried across a relayout.
#[derive(Debug, Clone)]
pub(super) struct CellSnapshot {
    content: String,
    fg: Foreground,
    bg: Background,
}

impl From<TableCell> for CellSnapshot {
    fn from(cell: TableCell) -> Self {
        CellSnapshot {
            content: cell.content,
            fg: cell.fg,
            bg: cell.bg,
        }
    }
}

impl Table {
    /// Re-reads the console size and rebuilds every back-reference for the
    /// current geometry, then repaints all stored content.
    ///
    /// Row and column counts are unchanged. This is the only operation
    /// allowed on a table whose console has been resized.
    pub fn reflow<B: TerminalBackend>(&mut self, console: &mut Console<B>) -> Result<()> {
        console.resize()?;
        info!(
            "Reflowing {}x{} table to a {}-column console",
            self.cols,
            self.rows,
            console.cols()
        );
        let snapshot = self.take_snapshot();
        self.rebuild(console, self.cols, snapshot)
    }

    /// Appends a blank row laid out like the existing ones.
    pub fn add_row<B: TerminalBackend>(&mut self, console: &mut Console<B>) -> Result<()> {
        self.ensure_current(console)?;
        let row = self.rows;
        let console_size = (console.rows(), console.cols());
        let fill = console.config().appearance.fill_glyph;
        let (fg, bg) = table_colors(console);

        let cells = (0..self.cols)
            .map(|col| TableCell::blank(&self.layout, row, col, console_size, fill, fg, bg))
            .collect();
        self.cells.push(cells);
        self.rows += 1;
        debug!("Added table row {}", row);
        self.paint_row(console, row)
    }

    /// Removes row `row`, moving every row below it up by one.
    pub fn remove_row<B: TerminalBackend>(
        &mut self,
        console: &mut Console<B>,
        row: usize,
    ) -> Result<()> {
        self.ensure_current(console)?;
        if row >= self.rows {
            return Err(Error::OutOfRange {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }

        for r in row..self.rows - 1 {
            for c in 0..self.cols {
                let below = &self.cells[r + 1][c];
                let (content, fg, bg) = (below.content.clone(), below.fg, below.bg);
                let cell = &mut self.cells[r][c];
                cell.content = content;
                cell.fg = fg;
                cell.bg = bg;
                self.replay_cell(console, r, c)?;
            }
        }

        let last = self.rows - 1;
        self.cells.pop();
        self.rows -= 1;
        if last < console.rows() {
            let blank = console.default_cell();
            console.framebuffer_mut().fill_row(last, blank)?;
        }
        debug!("Removed table row {}; {} rows remain", row, self.rows);
        Ok(())
    }

    /// Appends a column. All columns are laid out again and existing content
    /// is replayed into its new position.
    pub fn add_col<B: TerminalBackend>(&mut self, console: &mut Console<B>) -> Result<()> {
        self.ensure_current(console)?;
        let mut snapshot = self.take_snapshot();
        for row in &mut snapshot {
            row.push(None);
        }
        debug!("Adding table column {}", self.cols);
        self.rebuild(console, self.cols + 1, snapshot)
    }

    /// Removes column `col`, moving every column right of it one position
    /// left. The remaining columns are laid out across the usable width.
    ///
    /// A table keeps at least one column; removing the only one fails with
    /// [`Error::InvalidShape`].
    pub fn remove_col<B: TerminalBackend>(
        &mut self,
        console: &mut Console<B>,
        col: usize,
    ) -> Result<()> {
        self.ensure_current(console)?;
        if col >= self.cols {
            return Err(Error::OutOfRange {
                row: 0,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.cols == 1 {
            return Err(Error::InvalidShape {
                rows: self.rows,
                cols: 0,
            });
        }
        let mut snapshot = self.take_snapshot();
        for row in &mut snapshot {
            row.remove(col);
        }
        debug!("Removing table column {}", col);
        self.rebuild(console, self.cols - 1, snapshot)
    }

    /// Moves every cell's content and colors out, leaving the matrix empty.
    fn take_snapshot(&mut self) -> Vec<Vec<Option<CellSnapshot>>> {
        std::mem::take(&mut self.cells)
            .into_iter()
            .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
            .collect()
    }

    /// Lays the table out as `cols` columns over the console's current
    /// width, wipes the area it covers and repaints everything.
    ///
    /// Only the usable width of the covered rows is wiped; the padding
    /// column of an odd-width console is left alone.
    ///
    /// `snapshot` holds one entry per row; a `Some` at `[r][c]` is replayed
    /// into the new cell, anything else starts blank.
    pub(super) fn rebuild<B: TerminalBackend>(
        &mut self,
        console: &mut Console<B>,
        cols: usize,
        snapshot: Vec<Vec<Option<CellSnapshot>>>,
    ) -> Result<()> {
        let layout = ColumnLayout::compute(console.cols(), cols);
        let console_size = (console.rows(), console.cols());
        let fill = console.config().appearance.fill_glyph;
        let (fg, bg) = table_colors(console);

        let wipe = console.default_cell();
        let wipe_width = self
            .layout
            .usable_width()
            .max(layout.usable_width())
            .min(console_size.1);
        for row in 0..self.rows.min(console_size.0) {
            console
                .framebuffer_mut()
                .fill_cols(row, 0..wipe_width, wipe)?;
        }

        self.cells = snapshot
            .into_iter()
            .enumerate()
            .map(|(row, mut saved)| {
                (0..cols)
                    .map(|col| {
                        let mut cell =
                            TableCell::blank(&layout, row, col, console_size, fill, fg, bg);
                        if let Some(snap) = saved.get_mut(col).and_then(Option::take) {
                            cell.content = snap.content;
                            cell.fg = snap.fg;
                            cell.bg = snap.bg;
                        }
                        cell
                    })
                    .collect()
            })
            .collect();
        self.cols = cols;
        self.layout = layout;
        self.version = console.version();

        for row in 0..self.rows {
            self.paint_row(console, row)?;
        }
        Ok(())
    }
}

fn table_colors<B: TerminalBackend>(console: &Console<B>) -> (Foreground, Background) {
    let colors = &console.config().colors;
    (colors.table_foreground, colors.table_background)
}
