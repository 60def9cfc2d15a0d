// src/table/content.rs

//! Writing strings into table cells: padding, whitespace shortening and
//! overflow ellipsis.

use std::borrow::Cow;

use log::{trace, warn};

use super::{Table, TableCell};
use crate::backends::TerminalBackend;
use crate::cell::Cell;
use crate::color::{Background, Foreground};
use crate::console::Console;
use crate::error::{Error, Result};

const ELLIPSIS_LEN: usize = 3;

/// Shortens a whitespace-only value that does not fit to `size - 1`
/// characters, so it never turns into a cell full of dots.
pub(crate) fn shorten_whitespace(value: &str, size: usize) -> Cow<'_, str> {
    let len = value.chars().count();
    if len > size && value.chars().all(char::is_whitespace) {
        return Cow::Owned(value.chars().take(size.saturating_sub(1)).collect());
    }
    Cow::Borrowed(value)
}

/// The `size` glyphs a cell shows for `value`: left-aligned and padded with
/// `fill`, or cut to `size - 3` characters followed by three `ellipsis`
/// glyphs when it does not fit.
pub(crate) fn cell_glyphs(value: &str, size: usize, fill: char, ellipsis: char) -> Result<Vec<char>> {
    let value = shorten_whitespace(value, size);
    let chars: Vec<char> = value.chars().collect();
    let overflow = chars.len() > size;
    if overflow && size < ELLIPSIS_LEN {
        return Err(Error::CellTooSmall { size });
    }

    let max_content = if overflow { size - ELLIPSIS_LEN } else { size };
    Ok((0..size)
        .map(|j| match chars.get(j) {
            _ if j >= max_content => ellipsis,
            Some(&c) => c,
            None => fill,
        })
        .collect())
}

/// Like [`cell_glyphs`], but a cell too narrow for an ellipsis gets the
/// value hard-truncated instead.
fn replay_glyphs(value: &str, size: usize, fill: char, ellipsis: char) -> Result<Vec<char>> {
    match cell_glyphs(value, size, fill, ellipsis) {
        Err(Error::CellTooSmall { size }) => {
            warn!(
                "Replaying {:?} into a {}-wide cell without ellipsis",
                value, size
            );
            let mut glyphs: Vec<char> = value.chars().take(size).collect();
            glyphs.resize(size, fill);
            Ok(glyphs)
        }
        other => other,
    }
}

/// Writes `glyphs` into the framebuffer cells referenced by `cell`.
fn paint<B: TerminalBackend>(console: &mut Console<B>, cell: &TableCell, glyphs: &[char]) -> Result<()> {
    let framebuffer = console.framebuffer_mut();
    for (slot, &c) in cell.refs.iter().zip(glyphs) {
        if let Some(pos) = slot {
            *framebuffer.get_mut(pos.row, pos.col)? = Cell::new(c, cell.fg, cell.bg);
        }
    }
    Ok(())
}

impl Table {
    /// Places `value` in cell `(row, col)` using the given colors.
    ///
    /// The value is copied into the cell. Every referenced framebuffer cell
    /// takes the new colors. Values longer than the cell end in three
    /// ellipsis glyphs, which needs a cell at least three wide
    /// ([`Error::CellTooSmall`] otherwise). Zero-width cells store the value
    /// but draw nothing. Nothing is written when an error is returned.
    pub fn set_cell_value<B: TerminalBackend>(
        &mut self,
        console: &mut Console<B>,
        row: usize,
        col: usize,
        value: &str,
        fg: Foreground,
        bg: Background,
    ) -> Result<()> {
        self.ensure_current(console)?;
        self.check_bounds(row, col)?;

        let appearance = &console.config().appearance;
        let (fill, ellipsis) = (appearance.fill_glyph, appearance.ellipsis_glyph);
        let size = self.cells[row][col].size;

        let (stored, glyphs) = if size == 0 {
            (value.to_owned(), Vec::new())
        } else {
            let stored = shorten_whitespace(value, size).into_owned();
            let glyphs = cell_glyphs(&stored, size, fill, ellipsis)?;
            (stored, glyphs)
        };
        trace!("set_cell_value ({}, {}) size {}: {:?}", row, col, size, stored);

        let cell = &mut self.cells[row][col];
        cell.content = stored;
        cell.fg = fg;
        cell.bg = bg;
        paint(console, &self.cells[row][col], &glyphs)
    }

    /// Repaints cell `(row, col)` from its stored content and colors.
    pub(crate) fn replay_cell<B: TerminalBackend>(
        &self,
        console: &mut Console<B>,
        row: usize,
        col: usize,
    ) -> Result<()> {
        let cell = &self.cells[row][col];
        if cell.size == 0 {
            return Ok(());
        }
        let appearance = &console.config().appearance;
        let glyphs = replay_glyphs(
            &cell.content,
            cell.size,
            appearance.fill_glyph,
            appearance.ellipsis_glyph,
        )?;
        paint(console, cell, &glyphs)
    }

    /// Draws default-colored blanks over cell `(row, col)` without touching its content.
    pub(crate) fn blank_cell<B: TerminalBackend>(
        &self,
        console: &mut Console<B>,
        row: usize,
        col: usize,
    ) -> Result<()> {
        let cell = &self.cells[row][col];
        let colors = &console.config().colors;
        let blank = Cell::new(
            console.config().appearance.fill_glyph,
            colors.table_foreground,
            colors.table_background,
        );
        let framebuffer = console.framebuffer_mut();
        for pos in cell.refs.iter().flatten() {
            *framebuffer.get_mut(pos.row, pos.col)? = blank;
        }
        Ok(())
    }
}
