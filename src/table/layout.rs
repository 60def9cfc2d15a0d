// src/table/layout.rs

//! Column partitioning: which framebuffer columns belong to which table column.
//!
//! Every structural operation (creation, reflow, adding/removing rows and
//! columns) asks this module for spans, so all rows of a table always agree.

use log::debug;

use super::CellRef;

/// Console width rounded down to even.
pub fn usable_width(console_cols: usize) -> usize {
    console_cols - console_cols % 2
}

/// An inclusive range of framebuffer columns covered by one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Column geometry of a table over a console of a given width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    usable_width: usize,
    column_width: usize,
    separators: Vec<usize>,
    /// `None` marks a degenerate (zero-width) column.
    spans: Vec<Option<ColumnSpan>>,
}

impl ColumnLayout {
    /// Partitions `usable_width(console_cols)` into `cols` columns.
    ///
    /// Columns are `usable / cols` wide with a separator after each one but
    /// the last; the last column also takes the division remainder. When
    /// there are more columns than usable cells every column is degenerate.
    pub fn compute(console_cols: usize, cols: usize) -> Self {
        let usable = usable_width(console_cols);
        let column_width = if cols == 0 { 0 } else { usable / cols };

        if column_width == 0 {
            debug!(
                "Layout: {} columns do not fit in {} usable cells; all degenerate",
                cols, usable
            );
            return ColumnLayout {
                usable_width: usable,
                column_width,
                separators: Vec::new(),
                spans: vec![None; cols],
            };
        }

        let separators: Vec<usize> = (1..cols).map(|j| j * column_width).collect();
        let spans = (0..cols)
            .map(|c| {
                let start = if c == 0 { 0 } else { separators[c - 1] + 1 };
                let end = if c + 1 == cols {
                    usable - 1
                } else {
                    (c + 1) * column_width - 1
                };
                (end >= start).then_some(ColumnSpan { start, end })
            })
            .collect();

        debug!(
            "Layout: {} columns over {} usable cells, width {}, separators {:?}",
            cols, usable, column_width, separators
        );
        ColumnLayout {
            usable_width: usable,
            column_width,
            separators,
            spans,
        }
    }

    pub fn usable_width(&self) -> usize {
        self.usable_width
    }

    pub fn column_width(&self) -> usize {
        self.column_width
    }

    pub fn cols(&self) -> usize {
        self.spans.len()
    }

    /// Framebuffer columns holding the divider glyph.
    pub fn separators(&self) -> &[usize] {
        &self.separators
    }

    pub fn span(&self, col: usize) -> Option<ColumnSpan> {
        self.spans.get(col).copied().flatten()
    }

    /// Width of a table column; zero for degenerate or unknown columns.
    pub fn size(&self, col: usize) -> usize {
        self.span(col).map_or(0, |span| span.width())
    }

    /// Back-references for table column `col` on framebuffer row `row`.
    ///
    /// Positions outside a `console_rows x console_cols` grid map to `None`.
    pub fn map_row(
        &self,
        col: usize,
        row: usize,
        console_rows: usize,
        console_cols: usize,
    ) -> Vec<Option<CellRef>> {
        let Some(span) = self.span(col) else {
            return Vec::new();
        };
        (span.start..=span.end)
            .map(|fc| (row < console_rows && fc < console_cols).then_some(CellRef { row, col: fc }))
            .collect()
    }
}
