// src/backends/headless.rs

//! In-memory backend that records every frame instead of drawing it.
//!
//! Useful for tests and for rendering off-screen. The terminal size can be
//! changed at any time with [`HeadlessBackend::set_size`] to simulate a
//! window resize, and keypresses are served from a queue.

use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};
use log::{info, trace};

use crate::backends::{OriginalState, TerminalBackend};
use crate::cell::Cell;
use crate::color::{Background, Foreground};
use crate::keys::KeySymbol;

/// One frame as received by `write_grid`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    /// The characters of one row as a string.
    pub fn row_text(&self, row: usize) -> String {
        if row >= self.height {
            return String::new();
        }
        self.cells[row * self.width..(row + 1) * self.width]
            .iter()
            .map(|cell| cell.c)
            .collect()
    }
}

/// State the headless backend "restores" to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessSaved {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug)]
pub struct HeadlessBackend {
    rows: usize,
    cols: usize,
    default_fg: Foreground,
    default_bg: Background,
    attached: bool,
    cursor_visible: bool,
    frames: Vec<Frame>,
    keys: VecDeque<KeySymbol>,
    restore_count: usize,
    home_count: usize,
}

impl HeadlessBackend {
    pub fn new(rows: usize, cols: usize) -> Self {
        HeadlessBackend {
            rows,
            cols,
            default_fg: Foreground::default(),
            default_bg: Background::default(),
            attached: true,
            cursor_visible: true,
            frames: Vec::new(),
            keys: VecDeque::new(),
            restore_count: 0,
            home_count: 0,
        }
    }

    /// A backend with no terminal behind it; capturing state fails.
    pub fn detached(rows: usize, cols: usize) -> Self {
        HeadlessBackend {
            attached: false,
            ..HeadlessBackend::new(rows, cols)
        }
    }

    /// Colors reported as the terminal's defaults.
    pub fn with_default_colors(mut self, fg: Foreground, bg: Background) -> Self {
        self.default_fg = fg;
        self.default_bg = bg;
        self
    }

    pub fn set_size(&mut self, rows: usize, cols: usize) {
        info!(
            "HeadlessBackend: size changed from {}x{} to {}x{}",
            self.cols, self.rows, cols, rows
        );
        self.rows = rows;
        self.cols = cols;
    }

    pub fn push_key(&mut self, key: KeySymbol) {
        self.keys.push_back(key);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn restore_count(&self) -> usize {
        self.restore_count
    }

    pub fn home_count(&self) -> usize {
        self.home_count
    }
}

impl TerminalBackend for HeadlessBackend {
    type Saved = HeadlessSaved;

    fn size(&self) -> Result<(usize, usize)> {
        if !self.attached {
            bail!("HeadlessBackend: no terminal attached");
        }
        Ok((self.rows, self.cols))
    }

    fn capture_original_state(&mut self) -> Result<OriginalState<HeadlessSaved>> {
        if !self.attached {
            bail!("HeadlessBackend: no terminal attached");
        }
        Ok(OriginalState {
            default_fg: self.default_fg,
            default_bg: self.default_bg,
            cursor_visible: self.cursor_visible,
            saved: HeadlessSaved {
                rows: self.rows,
                cols: self.cols,
            },
        })
    }

    fn restore_original_state(&mut self, state: &OriginalState<HeadlessSaved>) -> Result<()> {
        info!(
            "HeadlessBackend: restoring original {}x{} state",
            state.saved.cols, state.saved.rows
        );
        self.restore_count += 1;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn home_cursor(&mut self) -> Result<()> {
        self.home_count += 1;
        Ok(())
    }

    fn write_grid(&mut self, cells: &[Cell], width: usize, height: usize) -> Result<()> {
        if cells.len() != width * height {
            bail!(
                "HeadlessBackend: frame of {} cells does not match {}x{}",
                cells.len(),
                width,
                height
            );
        }
        trace!("HeadlessBackend: recording {}x{} frame", width, height);
        self.frames.push(Frame {
            width,
            height,
            cells: cells.to_vec(),
        });
        Ok(())
    }

    fn read_key_blocking(&mut self) -> Result<KeySymbol> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow!("HeadlessBackend: no key queued"))
    }
}
