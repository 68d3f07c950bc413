#![no_main]

use libfuzzer_sys::fuzz_target;
use librosple::core::format::{date_text, decimal_text, digits_only, upper_text};
use librosple::core::{Cell, Row};
use librosple::pdt::FieldRecordBuilder;

fuzz_target!(|input: (String, f64, u8)| {
    let (text, number, width) = input;
    let cell = Cell::text(text.clone());
    let _ = date_text(&cell);
    let _ = digits_only(&cell);
    assert!(upper_text(&cell, usize::from(width)).chars().count() <= usize::from(width));
    let _ = decimal_text(&Cell::number(number), u32::from(width % 12));

    let row = Row::new(vec![Cell::text("1"), Cell::default(), cell.clone(), cell, Cell::number(number)]);
    let _ = FieldRecordBuilder::new(3, 4).build(&row).to_line().render();
});
