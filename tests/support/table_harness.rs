//! Test harness for driving a table on an in-memory console.
//!
//! Wraps a `Console<HeadlessBackend>` and a `Table` so tests can apply
//! operations and inspect what would be on screen.

use celltable::table::Table;
use celltable::{Background, Console, Foreground, HeadlessBackend};

pub struct TableHarness {
    pub console: Console<HeadlessBackend>,
    pub table: Table,
}

impl TableHarness {
    /// A `rows x cols` table on a console of `height x width` cells.
    pub fn new(height: usize, width: usize, rows: usize, cols: usize) -> Self {
        let mut console = Console::new(HeadlessBackend::new(height, width))
            .expect("headless console should open");
        let table = Table::new(&mut console, rows, cols).expect("table should lay out");
        Self { console, table }
    }

    /// Puts `value` into a cell in white on black.
    pub fn put(&mut self, row: usize, col: usize, value: &str) {
        self.table
            .set_cell_value(
                &mut self.console,
                row,
                col,
                value,
                Foreground::WHITE,
                Background::BLACK,
            )
            .expect("cell write should succeed");
    }

    /// Glyphs currently drawn for a table cell; `?` for unmapped positions.
    pub fn shown(&self, row: usize, col: usize) -> String {
        self.table
            .cell(row, col)
            .expect("cell in range")
            .refs()
            .iter()
            .map(|slot| {
                slot.map_or('?', |pos| {
                    self.console.cell(pos.row, pos.col).expect("ref in bounds").c
                })
            })
            .collect()
    }

    /// Stored content of every cell, row-major.
    pub fn contents(&self) -> Vec<Vec<String>> {
        (0..self.table.rows())
            .map(|r| {
                (0..self.table.cols())
                    .map(|c| self.table.cell(r, c).expect("cell in range").content().to_string())
                    .collect()
            })
            .collect()
    }

    /// Framebuffer row as text.
    pub fn screen_row(&self, row: usize) -> String {
        self.console
            .framebuffer()
            .row(row)
            .expect("row in bounds")
            .iter()
            .map(|cell| cell.c)
            .collect()
    }

    /// Renders and returns the text of row `row` in the frame the backend received.
    pub fn rendered_row(&mut self, row: usize) -> String {
        self.console.render(false).expect("render should succeed");
        self.console
            .backend()
            .last_frame()
            .expect("a frame was written")
            .row_text(row)
    }

    /// Simulates a terminal resize and reflows the table.
    pub fn resize_and_reflow(&mut self, height: usize, width: usize) {
        self.console.backend_mut().set_size(height, width);
        self.table
            .reflow(&mut self.console)
            .expect("reflow should succeed");
    }

    /// Checks that every mapped back-reference is inside the console.
    pub fn assert_refs_in_bounds(&self) {
        let (rows, cols) = (self.console.rows(), self.console.cols());
        for r in 0..self.table.rows() {
            for c in 0..self.table.cols() {
                for pos in self.table.cell(r, c).unwrap().refs().iter().flatten() {
                    assert!(
                        pos.row < rows && pos.col < cols,
                        "cell [{},{}] references ({},{}) outside {}x{}",
                        r,
                        c,
                        pos.row,
                        pos.col,
                        rows,
                        cols
                    );
                }
            }
        }
    }
}
