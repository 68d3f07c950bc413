#![cfg(feature = "core")]

use std::fs;

use librosple::core::format::{read_date, read_decimal};
use librosple::core::*;
use rust_decimal_macros::dec;

#[test]
fn cell_defaults() {
    let absent = Cell::empty();
    assert_eq!(decimal_text(absent, 2), "0.00");
    assert_eq!(decimal_text(&Cell::text("n/a"), 2), "0.00");
    assert_eq!(integer_of(&Cell::number(-7.9)), -7);
    assert_eq!(date_text(absent), BLANK_DATE);
    assert_eq!(text_of(absent), "");
    assert_eq!(digits_only(&Cell::text("RUC: 20-51234567-8")), "20512345678");
}

#[test]
fn provenance_of_defaults() {
    assert!(read_decimal(Cell::empty()).is_default());
    let read = read_decimal(&Cell::number(0.1));
    assert!(!read.is_default());
    assert_eq!(read.into_value(), dec!(0.1));

    assert!(read_date(&Cell::text("1-1-23")).is_default());
    assert_eq!(read_date(&Cell::text("05-06-2023")).value(), "05/06/2023");
}

#[test]
fn half_even_amounts() {
    assert_eq!(decimal_text(&Cell::number(2.345), 2), "2.34");
    assert_eq!(decimal_text(&Cell::number(2.355), 2), "2.36");
    assert_eq!(decimal_text(&Cell::number(-0.001), 2), "0.00");
    assert_eq!(decimal_text(&Cell::number(1.5), 8), "1.50000000");
}

#[test]
fn truncation_counts_characters() {
    let cell = Cell::text("Ñandú Señorial Compañía");
    assert_eq!(truncated_text(&cell, 5), "Ñandú");
    assert_eq!(upper_text(&cell, 5), "ÑANDÚ");
    assert_eq!(truncated_text(&Cell::text("abc"), 10), "abc");
}

#[test]
fn sanitized_document_number() {
    let row = Row::new(vec![Cell::text("E001/12/3")]);
    assert_eq!(sanitized(&row, 0), "E001-12-3");
    assert_eq!(sanitized(&row, 4), "-");
}

#[test]
fn info_flag_reading() {
    let sheet = |a1: Cell| Sheet::new("x", vec![Row::new(vec![a1])]);
    assert!(sheet(Cell::boolean(true)).info_flag());
    assert!(!sheet(Cell::boolean(false)).info_flag());
    assert!(sheet(Cell::text("TRUE")).info_flag());
    assert!(!sheet(Cell::number(1.0)).info_flag());
    assert!(!Sheet::new("x", vec![]).info_flag());
}

#[test]
fn converters_keep_separate_counters() {
    fn layout(line: &mut LineBuilder<'_>, _: &BookParameters) {
        line.text(0);
    }
    let params = BookParametersBuilder::new("20512345678", "2023").build();
    let a = BookConverter::new(&params, KeyStyle::Primary, layout);
    let b = BookConverter::new(&params, KeyStyle::Primary, layout);
    let row = Row::new(vec![Cell::text("x")]);
    a.convert(&row);
    a.convert(&row);
    assert_eq!(b.convert(&row).fields()[2], "M000000001");
    assert_eq!(a.issued(), 2);
}

#[test]
fn export_books_skips_unknown_sheets() {
    fn layout(line: &mut LineBuilder<'_>, _: &BookParameters) {
        line.text(0).push("1");
    }
    let table = [BookSpec {
        sheet: "AAA",
        book_id: "010100",
        content: BookContent::Rows {
            header: 1,
            filter: RowFilter::NonBlank,
            key: KeyStyle::Period,
            layout,
        },
    }];
    let wb = Workbook::new(vec![
        Sheet::new("ZZZ", vec![]),
        Sheet::new(
            "AAA",
            vec![
                Row::new(vec![Cell::boolean(true)]),
                Row::new(vec![Cell::text("uno")]),
                Row::default(),
                Row::new(vec![Cell::text("dos")]),
            ],
        ),
    ]);
    let params = BookParametersBuilder::new("20512345678", "2023")
        .month("01")
        .day("31")
        .build();
    let dir = tempfile::tempdir().unwrap();
    let files = export_books(&wb, &table, &params, dir.path(), None).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].book_id, "010100");
    assert_eq!(files[0].lines, 2);
    assert_eq!(
        fs::read_to_string(&files[0].path).unwrap(),
        "20230131|uno|1|\r\n20230131|dos|1|\r\n"
    );
}
