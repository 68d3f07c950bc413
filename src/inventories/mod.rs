//! Inventories-and-balances books (`LE03…`).
//!
//! One workbook carries a header sheet (`030000`) with the taxpayer and the
//! period, followed by one sheet per book. Each known sheet becomes one file
//! named after the PLE convention; sheets the table does not know are
//! ignored.
//!
//! # Example
//!
//! ```ignore
//! use librosple::inventories::InventoryProcessor;
//! use librosple::core::BookProcessor;
//!
//! let files = InventoryProcessor::new().process(&workbook, "out".as_ref())?;
//! ```

mod layouts;

use std::path::Path;

use tracing::info;

use crate::core::{
    AttachmentSource, BookContent, BookParameters, BookProcessor, BookSpec, ExportedFile,
    KeyStyle, Layout, Result, RowFilter, Workbook, export_books,
};

/// Title of the header sheet.
pub const HEADER_SHEET: &str = "030000";

const FINANCIAL: BookContent = BookContent::Rows {
    header: 2,
    filter: RowFilter::HasEntryId { column: 2 },
    key: KeyStyle::Period,
    layout: layouts::financial,
};

const fn rows(header: usize, key: KeyStyle, layout: Layout) -> BookContent {
    BookContent::Rows {
        header,
        filter: RowFilter::NonBlank,
        key,
        layout,
    }
}

const fn book(sheet: &'static str, content: BookContent) -> BookSpec {
    BookSpec {
        sheet,
        book_id: sheet,
        content,
    }
}

/// Dispatch table: sheet title to book recipe.
pub static INVENTORY_BOOKS: &[BookSpec] = &[
    book("030100", FINANCIAL),
    book("030200", rows(4, KeyStyle::Period, layouts::cash_and_banks)),
    book("030300", rows(5, KeyStyle::Primary, layouts::receivable)),
    book("030400", rows(5, KeyStyle::Primary, layouts::receivable)),
    book("030500", rows(5, KeyStyle::Primary, layouts::receivable)),
    book("030600", rows(5, KeyStyle::Primary, layouts::doubtful)),
    book("030700", rows(5, KeyStyle::Period, layouts::inventories)),
    book("030800", rows(5, KeyStyle::Primary, layouts::investments)),
    book("030900", rows(2, KeyStyle::Primary, layouts::intangibles)),
    book("031100", rows(5, KeyStyle::Primary, layouts::remunerations)),
    book("031200", rows(5, KeyStyle::Primary, layouts::trade_payable)),
    book("031300", rows(5, KeyStyle::Primary, layouts::other_payable)),
    book("031400", BookContent::AlwaysEmpty),
    book("031601", BookContent::Summary(layouts::capital_stock)),
    book("031602", rows(5, KeyStyle::Period, layouts::shareholders)),
    book("031700", rows(3, KeyStyle::Period, layouts::trial_balance)),
    book("031800", FINANCIAL),
    book(
        "031900",
        BookContent::Rows {
            header: 2,
            filter: RowFilter::HasEntryId { column: 2 },
            key: KeyStyle::Period,
            layout: layouts::equity_changes,
        },
    ),
    book("032000", FINANCIAL),
    book(
        "032300",
        BookContent::Attachment {
            extension: "pdf",
            token: (2, 2),
        },
    ),
    book("032400", FINANCIAL),
    book("032500", FINANCIAL),
];

/// Exports the inventories-and-balances books of a workbook.
#[derive(Default)]
pub struct InventoryProcessor<'a> {
    attachments: Option<&'a dyn AttachmentSource>,
}

impl<'a> InventoryProcessor<'a> {
    /// A processor without an attachment source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `source` to fetch the notes-to-financial-statements document.
    pub fn with_attachments(mut self, source: &'a dyn AttachmentSource) -> Self {
        self.attachments = Some(source);
        self
    }
}

impl BookProcessor for InventoryProcessor<'_> {
    fn title(&self) -> &'static str {
        "Libro de Inventarios y Balances"
    }

    fn process(&self, workbook: &Workbook, target: &Path) -> Result<Vec<ExportedFile>> {
        let params = BookParameters::from_inventory_header(workbook.require_sheet(HEADER_SHEET)?)?;
        info!(
            taxpayer = %params.taxpayer_id,
            period = %params.period_id(),
            "exporting inventories and balances"
        );
        export_books(workbook, INVENTORY_BOOKS, &params, target, self.attachments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::find_book;

    #[test]
    fn table_has_unique_sheets() {
        for (i, spec) in INVENTORY_BOOKS.iter().enumerate() {
            assert!(
                INVENTORY_BOOKS[i + 1..].iter().all(|s| s.sheet != spec.sheet),
                "duplicate sheet {}",
                spec.sheet
            );
        }
    }

    #[test]
    fn capital_stock_is_summary() {
        let spec = find_book(INVENTORY_BOOKS, "031601").unwrap();
        assert!(matches!(spec.content, BookContent::Summary(_)));
    }

    #[test]
    fn header_sheet_is_not_a_book() {
        assert!(find_book(INVENTORY_BOOKS, HEADER_SHEET).is_none());
        assert!(find_book(INVENTORY_BOOKS, "031500").is_none());
    }
}
