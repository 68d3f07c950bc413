//! Fixed assets books (`LE07…`), annual.
//!
//! Parameters come from the `070000` header sheet. Every record opens with
//! a primary key; amounts round half away from zero.

use std::path::Path;

use tracing::info;

use crate::core::{
    BookContent, BookParameters, BookProcessor, BookSpec, ExportedFile, KeyStyle, Layout,
    LineBuilder, Result, RowFilter, Workbook, export_books,
};

/// Title of the header sheet.
pub const HEADER_SHEET: &str = "070000";

const fn book(sheet: &'static str, header: usize, layout: Layout) -> BookSpec {
    BookSpec {
        sheet,
        book_id: sheet,
        content: BookContent::Rows {
            header,
            filter: RowFilter::NonBlank,
            key: KeyStyle::Primary,
            layout,
        },
    }
}

/// Dispatch table of the fixed assets books.
pub static ASSET_BOOKS: &[BookSpec] = &[
    book("070100", 4, fixed_assets),
    book("070300", 3, exchange_difference),
    book("070400", 3, leased_assets),
];

/// 7.1 Fixed assets detail.
fn fixed_assets(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.texts(&[0, 2, 4, 6, 8, 10, 11])
        .truncated(3, 40)
        .truncated_or_dash(13, 20)
        .truncated_or_dash(14, 20)
        .truncated_or_dash(15, 30)
        .amounts_half_up(16..=24)
        .date(25)
        .date(26)
        .text(27)
        .text(29)
        .amounts_half_up(30..=38)
        .push("1");
}

/// 7.3 Exchange difference of assets in foreign currency.
fn exchange_difference(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.push("9")
        .text(0)
        .date(1)
        .decimal_half_up(2, 2)
        .decimal_half_up(3, 3)
        .decimal_half_up(4, 2)
        .decimal_half_up(5, 3)
        .amounts_half_up(6..=9)
        .push("1");
}

/// 7.4 Assets under finance lease.
fn leased_assets(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.push("9")
        .text(0)
        .date(1)
        .text(2)
        .date(4)
        .integer(5)
        .decimal_half_up(6, 2)
        .push("1");
}

/// Exports the fixed assets books of a workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetsProcessor;

impl AssetsProcessor {
    /// A new processor.
    pub fn new() -> Self {
        Self
    }
}

impl BookProcessor for AssetsProcessor {
    fn title(&self) -> &'static str {
        "Registro de Activos Fijos"
    }

    fn process(&self, workbook: &Workbook, target: &Path) -> Result<Vec<ExportedFile>> {
        let params = BookParameters::from_annual_header(workbook.require_sheet(HEADER_SHEET)?)?;
        info!(
            taxpayer = %params.taxpayer_id,
            year = %params.year,
            "exporting fixed assets"
        );
        export_books(workbook, ASSET_BOOKS, &params, target, None)
    }
}
