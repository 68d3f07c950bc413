//! Cost records books (`LE10…`), annual.
//!
//! Parameters come from the `LE100000` header sheet. Every book skips three
//! decoration rows and rounds amounts half away from zero.

use std::path::Path;

use tracing::info;

use crate::core::{
    BookContent, BookParameters, BookProcessor, BookSpec, ExportedFile, KeyStyle, Layout,
    LineBuilder, Result, RowFilter, Workbook, export_books, integer_of,
};

/// Title of the header sheet.
pub const HEADER_SHEET: &str = "LE100000";

const HEADER_ROWS: usize = 3;

const fn book(sheet: &'static str, key: KeyStyle, layout: Layout) -> BookSpec {
    BookSpec {
        sheet,
        book_id: sheet,
        content: BookContent::Rows {
            header: HEADER_ROWS,
            filter: RowFilter::NonBlank,
            key,
            layout,
        },
    }
}

/// Dispatch table of the cost books.
pub static COST_BOOKS: &[BookSpec] = &[
    book("100100", KeyStyle::Period, cost_of_sales),
    book("100200", KeyStyle::None, monthly_production),
    book("100300", KeyStyle::Period, cost_centres),
    book("100400", KeyStyle::Sequence(24), cost_items),
];

/// 10.1 Cost of sales.
fn cost_of_sales(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.amounts_half_up(0..=3).push("1");
}

/// 10.2 Monthly production; the month number replaces the period key.
fn monthly_production(line: &mut LineBuilder<'_>, params: &BookParameters) {
    let month = integer_of(line.row().cell(0));
    line.push(format!("{}{:02}00", params.year, month))
        .amounts_half_up(2..=7)
        .push("1");
}

/// 10.3 Cost centres.
fn cost_centres(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .truncated(1, 100)
        .amounts_half_up(2..=9)
        .text(10)
        .push("1");
}

/// 10.4 Cost items.
fn cost_items(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.texts(&[0, 1, 2, 3]).push("1");
}

/// Exports the cost records books of a workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct CostsProcessor;

impl CostsProcessor {
    /// A new processor.
    pub fn new() -> Self {
        Self
    }
}

impl BookProcessor for CostsProcessor {
    fn title(&self) -> &'static str {
        "Registro de Costos"
    }

    fn process(&self, workbook: &Workbook, target: &Path) -> Result<Vec<ExportedFile>> {
        let params = BookParameters::from_annual_header(workbook.require_sheet(HEADER_SHEET)?)?;
        info!(
            taxpayer = %params.taxpayer_id,
            year = %params.year,
            "exporting cost records"
        );
        export_books(workbook, COST_BOOKS, &params, target, None)
    }
}
