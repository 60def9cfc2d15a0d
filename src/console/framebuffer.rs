// src/console/framebuffer.rs

//! The console's owned grid of cells.

use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cell::Cell;
use crate::error::{Error, Result};

static NEXT_CONSOLE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one allocation of one console's framebuffer.
///
/// `console` is unique per framebuffer owner; `generation` increments every
/// time the grid is reallocated. Anything holding positions into the grid
/// compares versions before writing through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferVersion {
    pub console: u64,
    pub generation: u64,
}

/// A `rows x cols` grid of cells stored row-major.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    version: FramebufferVersion,
}

impl Framebuffer {
    pub(crate) fn new(rows: usize, cols: usize, fill: Cell) -> Self {
        Framebuffer {
            rows,
            cols,
            cells: vec![fill; rows * cols],
            version: FramebufferVersion {
                console: NEXT_CONSOLE_ID.fetch_add(1, Ordering::Relaxed),
                generation: 0,
            },
        }
    }

    /// Replaces the grid with a fresh one; no old content survives.
    pub(crate) fn reallocate(&mut self, rows: usize, cols: usize, fill: Cell) {
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![fill; rows * cols];
        self.version.generation += 1;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn version(&self) -> FramebufferVersion {
        self.version
    }

    /// The whole grid flattened row-major, ready to hand to a backend.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, row: usize) -> Result<&[Cell]> {
        let start = self.index(row, 0)?;
        Ok(&self.cells[start..start + self.cols])
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let idx = self.index(row, col)?;
        Ok(&mut self.cells[idx])
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn fill_row(&mut self, row: usize, cell: Cell) -> Result<()> {
        let start = self.index(row, 0)?;
        let cols = self.cols;
        self.cells[start..start + cols].fill(cell);
        Ok(())
    }

    /// Fills columns `cols` of one row. The range must lie inside the row.
    pub fn fill_cols(&mut self, row: usize, cols: Range<usize>, cell: Cell) -> Result<()> {
        if cols.is_empty() {
            return Ok(());
        }
        let start = self.index(row, cols.start)?;
        self.index(row, cols.end - 1)?;
        let len = cols.end - cols.start;
        self.cells[start..start + len].fill(cell);
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }
}
