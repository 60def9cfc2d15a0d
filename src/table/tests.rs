// src/table/tests.rs

//! Unit tests for table layout, content placement and structural changes.

#[cfg(test)]
mod table_tests {
    use crate::backends::HeadlessBackend;
    use crate::color::{Background, Foreground};
    use crate::console::Console;
    use crate::error::Error;
    use crate::table::{usable_width, ColumnLayout, Table};
    use test_log::test;

    // --- Test Helpers ---

    fn new_console(rows: usize, cols: usize) -> Console<HeadlessBackend> {
        Console::new(HeadlessBackend::new(rows, cols)).unwrap()
    }

    /// The glyphs currently shown through a table cell's back-references.
    fn shown(console: &Console<HeadlessBackend>, table: &Table, row: usize, col: usize) -> String {
        table
            .cell(row, col)
            .unwrap()
            .refs()
            .iter()
            .map(|slot| slot.map_or('?', |pos| console.cell(pos.row, pos.col).unwrap().c))
            .collect()
    }

    fn put(table: &mut Table, console: &mut Console<HeadlessBackend>, row: usize, col: usize, value: &str) {
        table
            .set_cell_value(console, row, col, value, Foreground::BRIGHT_WHITE, Background::BLACK)
            .unwrap();
    }

    fn sizes(table: &Table) -> Vec<usize> {
        (0..table.cols())
            .map(|c| table.cell(0, c).unwrap().size())
            .collect()
    }

    // --- Layout ---

    #[test]
    fn usable_width_rounds_down_to_even() {
        assert_eq!(usable_width(81), 80);
        assert_eq!(usable_width(80), 80);
        assert_eq!(usable_width(1), 0);
        assert_eq!(usable_width(0), 0);
    }

    #[test]
    fn odd_console_of_81_splits_into_four_columns_of_20() {
        let mut console = new_console(5, 81);
        let table = Table::new(&mut console, 2, 4).unwrap();

        assert_eq!(table.layout().usable_width(), 80);
        assert_eq!(table.layout().column_width(), 20);
        assert_eq!(table.layout().separators(), &[20, 40, 60]);
        assert_eq!(sizes(&table), vec![20, 19, 19, 19]);
        for sep in [20, 40, 60] {
            assert_eq!(console.cell(0, sep).unwrap().c, '|');
            assert_eq!(console.cell(1, sep).unwrap().c, '|');
        }
        // No divider after the last column or outside the table's rows.
        assert_eq!(console.cell(0, 80).unwrap().c, ' ');
        assert_eq!(console.cell(2, 20).unwrap().c, ' ');
    }

    #[test]
    fn columns_and_separators_fill_the_usable_width() {
        for width in [2usize, 7, 10, 33, 80, 81, 120, 157] {
            let usable = usable_width(width);
            for cols in 1..=usable {
                let layout = ColumnLayout::compute(width, cols);
                let total: usize = (0..cols).map(|c| layout.size(c)).sum();
                assert_eq!(
                    total + cols - 1,
                    usable,
                    "width {} cols {}",
                    width,
                    cols
                );
            }
        }
    }

    #[test]
    fn back_references_cover_each_span_on_their_own_row() {
        let mut console = new_console(4, 40);
        let table = Table::new(&mut console, 3, 2).unwrap();
        let cell = table.cell(2, 1).unwrap();
        assert_eq!(cell.size(), 19);
        assert_eq!(cell.refs().len(), 19);
        let first = cell.refs()[0].unwrap();
        let last = cell.refs()[18].unwrap();
        assert_eq!((first.row, first.col), (2, 21));
        assert_eq!((last.row, last.col), (2, 39));
        assert_eq!(cell.content(), " ".repeat(19));
    }

    #[test]
    fn too_many_columns_are_degenerate() {
        let mut console = new_console(2, 5);
        let mut table = Table::new(&mut console, 1, 6).unwrap();
        for c in 0..6 {
            let cell = table.cell(0, c).unwrap();
            assert!(cell.is_degenerate());
            assert!(cell.refs().is_empty());
        }
        // Writing into a zero-width cell is a no-op, not an error.
        put(&mut table, &mut console, 0, 3, "anything");
        assert_eq!(table.cell(0, 3).unwrap().content(), "anything");
        assert!(console.framebuffer().row(0).unwrap().iter().all(|c| c.c == ' '));
    }

    #[test]
    fn degenerate_cell_stores_whitespace_unchanged() {
        let mut console = new_console(1, 4);
        let mut table = Table::new(&mut console, 1, 5).unwrap();
        assert!(table.cell(0, 2).unwrap().is_degenerate());
        put(&mut table, &mut console, 0, 2, "   ");
        assert_eq!(table.cell(0, 2).unwrap().content(), "   ");
    }

    #[test]
    fn zero_columns_is_rejected() {
        let mut console = new_console(2, 10);
        assert!(matches!(
            Table::new(&mut console, 2, 0),
            Err(Error::InvalidShape { rows: 2, cols: 0 })
        ));
    }

    #[test]
    fn rows_below_the_console_map_to_nothing() {
        let mut console = new_console(2, 10);
        let mut table = Table::new(&mut console, 3, 1).unwrap();
        assert!(table.cell(2, 0).unwrap().refs().iter().all(Option::is_none));
        put(&mut table, &mut console, 2, 0, "hidden");
        assert_eq!(table.cell(2, 0).unwrap().content(), "hidden");
    }

    // --- Content ---

    #[test]
    fn value_reads_back_left_aligned_and_padded() {
        let mut console = new_console(3, 20);
        let mut table = Table::new(&mut console, 2, 2).unwrap();
        table
            .set_cell_value(&mut console, 1, 1, "abc", Foreground::YELLOW, Background::BLUE)
            .unwrap();

        assert_eq!(shown(&console, &table, 1, 1), "abc      ");
        let cell = table.cell(1, 1).unwrap();
        assert_eq!(cell.content(), "abc");
        assert_eq!((cell.fg(), cell.bg()), (Foreground::YELLOW, Background::BLUE));
        for pos in cell.refs().iter().flatten() {
            let fb = console.cell(pos.row, pos.col).unwrap();
            assert_eq!((fb.fg, fb.bg), (Foreground::YELLOW, Background::BLUE));
        }
    }

    #[test]
    fn overflowing_value_ends_in_three_dots() {
        let mut console = new_console(2, 81);
        let mut table = Table::new(&mut console, 1, 4).unwrap();
        put(&mut table, &mut console, 0, 0, "HelloVeryLongTextHere");
        assert_eq!(shown(&console, &table, 0, 0), "HelloVeryLongText...");
        assert_eq!(table.cell(0, 0).unwrap().content(), "HelloVeryLongTextHere");
    }

    #[test]
    fn whitespace_overflow_is_shortened() {
        let mut console = new_console(2, 10);
        let mut table = Table::new(&mut console, 1, 2).unwrap();
        assert_eq!(table.cell(0, 1).unwrap().size(), 4);
        put(&mut table, &mut console, 0, 1, "          ");
        assert_eq!(table.cell(0, 1).unwrap().content(), "   ");
        assert_eq!(shown(&console, &table, 0, 1), "    ");
    }

    #[test]
    fn overflow_in_a_narrow_cell_is_rejected_without_writing() {
        let mut console = new_console(1, 6);
        let mut table = Table::new(&mut console, 1, 3).unwrap();
        assert_eq!(table.cell(0, 0).unwrap().size(), 2);
        let err = table
            .set_cell_value(&mut console, 0, 0, "abc", Foreground::RED, Background::RED)
            .unwrap_err();
        assert!(matches!(err, Error::CellTooSmall { size: 2 }));
        assert_eq!(table.cell(0, 0).unwrap().fg(), Foreground::BRIGHT_WHITE);
        assert_eq!(shown(&console, &table, 0, 0), "  ");
    }

    #[test]
    fn out_of_range_cell_is_an_error() {
        let mut console = new_console(3, 20);
        let mut table = Table::new(&mut console, 2, 2).unwrap();
        let err = table
            .set_cell_value(&mut console, 2, 0, "x", Foreground::RED, Background::BLACK)
            .unwrap_err();
        assert!(matches!(err, Error::OutOfRange { row: 2, col: 0, rows: 2, cols: 2 }));
        assert!(table.cell(0, 2).is_err());
    }

    // --- Rows ---

    #[test]
    fn add_then_remove_last_row_restores_the_table() {
        let mut console = new_console(5, 20);
        let mut table = Table::new(&mut console, 2, 2).unwrap();

        table.add_row(&mut console).unwrap();
        assert_eq!(table.rows(), 3);
        assert_eq!(sizes(&table), vec![10, 9]);
        assert_eq!(table.cell(2, 1).unwrap().refs()[0].unwrap().col, 11);
        assert_eq!(console.cell(2, 10).unwrap().c, '|');
        put(&mut table, &mut console, 2, 0, "new");

        table.remove_row(&mut console, 2).unwrap();
        assert_eq!(table.rows(), 2);
        let blank = console.default_cell();
        assert!(console.framebuffer().row(2).unwrap().iter().all(|c| *c == blank));
    }

    #[test]
    fn removing_a_middle_row_shifts_rows_up() {
        let mut console = new_console(5, 20);
        let mut table = Table::new(&mut console, 3, 2).unwrap();
        for r in 0..3 {
            put(&mut table, &mut console, r, 0, &format!("row{}", r));
        }
        table.remove_row(&mut console, 0).unwrap();

        assert_eq!(table.rows(), 2);
        assert_eq!(table.cell(0, 0).unwrap().content(), "row1");
        assert_eq!(table.cell(1, 0).unwrap().content(), "row2");
        assert_eq!(shown(&console, &table, 0, 0), "row1      ");
        assert!(console.framebuffer().row(2).unwrap().iter().all(|c| c.c == ' '));
        assert!(table.remove_row(&mut console, 2).is_err());
    }

    // --- Columns ---

    #[test]
    fn add_col_preserves_content() {
        let mut console = new_console(3, 40);
        let mut table = Table::new(&mut console, 2, 2).unwrap();
        put(&mut table, &mut console, 0, 0, "alpha");
        put(&mut table, &mut console, 1, 1, "a value that overflows");
        let before: Vec<String> = (0..2)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| table.cell(r, c).unwrap().content().to_string())
            .collect();

        table.add_col(&mut console).unwrap();
        assert_eq!(table.cols(), 3);
        assert_eq!(table.layout().separators(), &[13, 26]);

        let after: Vec<String> = (0..2)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| table.cell(r, c).unwrap().content().to_string())
            .collect();
        assert_eq!(before, after);
        assert_eq!(shown(&console, &table, 0, 0), "alpha        ");
        assert_eq!(shown(&console, &table, 1, 1), "a value t...");
        assert_eq!(table.cell(0, 2).unwrap().content().trim(), "");
        // Old separator position is wiped.
        assert_ne!(console.cell(0, 20).unwrap().c, '|');
    }

    #[test]
    fn remove_col_shifts_columns_left() {
        let mut console = new_console(3, 41);
        let mut table = Table::new(&mut console, 2, 4).unwrap();
        for r in 0..2 {
            for c in 0..4 {
                put(&mut table, &mut console, r, c, &format!("r{}c{}", r, c));
            }
        }

        table.remove_col(&mut console, 1).unwrap();
        assert_eq!(table.cols(), 3);
        for r in 0..2 {
            assert_eq!(table.cell(r, 0).unwrap().content(), format!("r{}c0", r));
            assert_eq!(table.cell(r, 1).unwrap().content(), format!("r{}c2", r));
            assert_eq!(table.cell(r, 2).unwrap().content(), format!("r{}c3", r));
        }
        assert!(table.cell(0, 3).is_err());
        let total: usize = sizes(&table).iter().sum();
        assert_eq!(total + 2, 40);
        assert!(table.remove_col(&mut console, 3).is_err());
    }

    #[test]
    fn removing_the_last_column_leaves_the_rest() {
        let mut console = new_console(2, 20);
        let mut table = Table::new(&mut console, 1, 2).unwrap();
        put(&mut table, &mut console, 0, 0, "keep");
        put(&mut table, &mut console, 0, 1, "drop");
        table.remove_col(&mut console, 1).unwrap();

        assert_eq!(table.cols(), 1);
        assert_eq!(table.cell(0, 0).unwrap().content(), "keep");
        let row: String = console.framebuffer().row(0).unwrap().iter().map(|c| c.c).collect();
        assert!(!row.contains("drop"));
        assert!(!row.contains('|'));
    }

    #[test]
    fn removing_the_only_column_is_rejected() {
        let mut console = new_console(2, 20);
        let mut table = Table::new(&mut console, 2, 1).unwrap();
        put(&mut table, &mut console, 0, 0, "only");

        assert!(matches!(
            table.remove_col(&mut console, 0),
            Err(Error::InvalidShape { rows: 2, cols: 0 })
        ));
        assert_eq!(table.cols(), 1);
        assert_eq!(table.cell(0, 0).unwrap().content(), "only");
        table.add_row(&mut console).unwrap();
        assert!(table.cell(2, 0).is_ok());
    }

    #[test]
    fn padding_column_outside_the_table_is_left_alone() {
        let mut console = new_console(2, 81);
        console
            .set_cell(0, 80, Foreground::RED, Background::RED, '#')
            .unwrap();

        let mut table = Table::new(&mut console, 1, 4).unwrap();
        assert_eq!(console.cell(0, 80).unwrap().c, '#');
        table.add_col(&mut console).unwrap();
        table.remove_col(&mut console, 0).unwrap();
        table.reflow(&mut console).unwrap();

        let kept = console.cell(0, 80).unwrap();
        assert_eq!((kept.c, kept.fg, kept.bg), ('#', Foreground::RED, Background::RED));
    }

    // --- Resize ---

    #[test]
    fn resize_makes_the_table_stale_until_reflowed() {
        let mut console = new_console(4, 40);
        let mut table = Table::new(&mut console, 2, 2).unwrap();
        put(&mut table, &mut console, 0, 1, "right");

        console.backend_mut().set_size(4, 60);
        assert!(console.resize().unwrap());
        assert!(matches!(
            table.set_cell_value(&mut console, 0, 0, "x", Foreground::RED, Background::BLACK),
            Err(Error::StaleLayout { .. })
        ));
        assert!(matches!(table.add_row(&mut console), Err(Error::StaleLayout { .. })));

        table.reflow(&mut console).unwrap();
        assert_eq!(table.version(), console.version());
        assert_eq!(table.layout().separators(), &[30]);
        assert_eq!(table.cell(0, 1).unwrap().size(), 29);
        assert_eq!(shown(&console, &table, 0, 1).trim_end(), "right");
        put(&mut table, &mut console, 0, 0, "x");
    }

    #[test]
    fn reflow_picks_up_a_resize_itself() {
        let mut console = new_console(4, 20);
        let mut table = Table::new(&mut console, 4, 2).unwrap();
        put(&mut table, &mut console, 3, 0, "bottom");

        console.backend_mut().set_size(2, 20);
        table.reflow(&mut console).unwrap();
        assert_eq!(console.rows(), 2);
        assert_eq!(table.rows(), 4);
        assert!(table.cell(3, 0).unwrap().refs().iter().all(Option::is_none));
        assert_eq!(table.cell(3, 0).unwrap().content(), "bottom");
    }

    #[test]
    fn table_from_another_console_is_stale() {
        let mut first = new_console(2, 10);
        let mut second = new_console(2, 10);
        let mut table = Table::new(&mut first, 1, 1).unwrap();
        assert!(matches!(
            table.add_col(&mut second),
            Err(Error::StaleLayout { .. })
        ));
    }

    // --- Clear / redraw / debug ---

    #[test]
    fn clear_hides_content_and_redraw_restores_it() {
        let mut console = new_console(2, 20);
        let mut table = Table::new(&mut console, 1, 2).unwrap();
        put(&mut table, &mut console, 0, 0, "shown");

        table.clear(&mut console, false).unwrap();
        assert_eq!(shown(&console, &table, 0, 0), " ".repeat(10));
        assert_eq!(table.cell(0, 0).unwrap().content(), "shown");

        table.redraw(&mut console, false).unwrap();
        assert_eq!(shown(&console, &table, 0, 0), "shown     ");
        let frame = console.backend().last_frame().unwrap();
        assert!(frame.row_text(0).starts_with("shown     |"));
        assert_eq!(console.backend().frames().len(), 2);
    }

    #[test]
    fn debug_dump_marks_separators() {
        let mut console = new_console(1, 8);
        let table = Table::new(&mut console, 1, 2).unwrap();
        let dump = table.debug_dump(&console).unwrap();
        assert!(dump.starts_with("=== Table Debug Start ==="));
        assert!(dump.contains("Cell [0,0], size=4:"));
        assert!(dump.contains("Cell [0,1], size=3:"));
        assert!(!dump.contains("SEP"));

        console
            .set_cell(0, 1, Foreground::WHITE, Background::BLACK, '|')
            .unwrap();
        assert!(table.debug_dump(&console).unwrap().contains("[||SEP]"));
    }

    #[test]
    fn remove_leaves_the_framebuffer_alone() {
        let mut console = new_console(2, 20);
        let mut table = Table::new(&mut console, 1, 2).unwrap();
        put(&mut table, &mut console, 0, 0, "stay");
        let before = console.framebuffer().cells().to_vec();
        table.remove();
        assert_eq!(console.framebuffer().cells(), &before[..]);
    }
}
