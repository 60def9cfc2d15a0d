// src/error.rs

use thiserror::Error;

use crate::console::FramebufferVersion;

/// Errors returned by console and table operations.
///
/// Addressing and sizing problems are recoverable: the operation is rejected
/// before anything is written. Backend failures carry the backend's own
/// `anyhow` context chain.
#[derive(Error, Debug)]
pub enum Error {
    #[error("position ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Ellipsis truncation needs at least three cells.
    #[error("cell of width {size} is too small for an overflow ellipsis")]
    CellTooSmall { size: usize },

    #[error("invalid terminal handle: {0}")]
    InvalidHandle(String),

    #[error("could not determine terminal size: {0}")]
    SizeQuery(String),

    #[error("a table needs at least one column (requested {rows}x{cols})")]
    InvalidShape { rows: usize, cols: usize },

    /// The table's back-references were built against another framebuffer
    /// generation (or another console) and must be reflowed first.
    #[error("table laid out against {table:?} but console is at {console:?}; reflow required")]
    StaleLayout {
        table: FramebufferVersion,
        console: FramebufferVersion,
    },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
