//! Identity document (DOI) number checks.
//!
//! A pre-flight helper for the inventories workbook: it does not take part
//! in the export, it reports rows whose document number does not fit the
//! shape of its document type so they can be fixed before exporting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Sheet, Workbook};

const RUC_FACTORS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// A document type and number read from one sheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCheck {
    /// PLE document type code (`0`, `1`, `4`, `6`, `7`, `A`).
    pub doc_type: Option<String>,
    /// Document number as displayed.
    pub doc_number: String,
    /// 1-based row of the sheet.
    pub row: usize,
}

impl DocumentCheck {
    /// Create a check for one row.
    pub fn new(doc_type: Option<String>, doc_number: impl Into<String>, row: usize) -> Self {
        Self {
            doc_type,
            doc_number: doc_number.into(),
            row,
        }
    }

    /// True when the number is well formed for its type.
    ///
    /// Unknown or missing types never pass.
    pub fn passes(&self) -> bool {
        let number = self.doc_number.as_str();
        match self.doc_type.as_deref() {
            Some("0") => is_alphanumeric(number, 1, 15),
            Some("1") => is_digits(number, 8),
            Some("4" | "7") => is_alphanumeric(number, 1, 12),
            Some("6") => is_valid_ruc(number),
            Some("A") => is_digits(number, 15),
            _ => false,
        }
    }

    /// Negation of [`passes`](Self::passes).
    pub fn failed(&self) -> bool {
        !self.passes()
    }
}

fn is_alphanumeric(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Modulus-11 check of an 11-digit taxpayer id.
///
/// ```
/// use librosple::doi::is_valid_ruc;
///
/// assert!(is_valid_ruc("20100066603"));
/// assert!(!is_valid_ruc("20100066604"));
/// ```
pub fn is_valid_ruc(ruc: &str) -> bool {
    if !is_digits(ruc, 11) {
        return false;
    }
    let digits: Vec<u32> = ruc.bytes().map(|b| u32::from(b - b'0')).collect();
    let sum: u32 = digits.iter().zip(RUC_FACTORS).map(|(d, f)| d * f).sum();
    let check = (11 - sum % 11) % 10;
    digits[10] == check
}

/// Rows of `sheet` whose document number fails its check.
///
/// Sheets declaring no information yield nothing; blank rows are skipped.
pub fn check_sheet(
    sheet: &Sheet,
    type_column: usize,
    number_column: usize,
    header_rows: usize,
) -> Vec<DocumentCheck> {
    if !sheet.info_flag() {
        return Vec::new();
    }
    sheet
        .rows
        .iter()
        .enumerate()
        .skip(header_rows)
        .filter(|(_, row)| !row.is_blank())
        .map(|(i, row)| {
            DocumentCheck::new(
                row.cell(type_column).formatted.clone(),
                row.cell(number_column).formatted.clone().unwrap_or_default(),
                i + 1,
            )
        })
        .filter(DocumentCheck::failed)
        .collect()
}

/// Which columns of a sheet hold the document type and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRequest {
    /// Sheet title.
    pub sheet: &'static str,
    /// Column of the document type.
    pub type_column: usize,
    /// Column of the document number.
    pub number_column: usize,
    /// Decoration rows.
    pub header_rows: usize,
}

const fn request(sheet: &'static str, type_column: usize, number_column: usize) -> CheckRequest {
    CheckRequest {
        sheet,
        type_column,
        number_column,
        header_rows: 5,
    }
}

/// Sheets of the inventories workbook carrying counterparty documents.
pub const INVENTORY_REQUESTS: [CheckRequest; 8] = [
    request("030300", 0, 2),
    request("030400", 0, 2),
    request("030500", 0, 2),
    request("030600", 0, 2),
    request("031100", 1, 3),
    request("031200", 0, 2),
    request("031300", 0, 2),
    request("031602", 0, 2),
];

/// Run `requests` against `workbook`, keyed by sheet title.
///
/// Absent sheets are left out of the result.
pub fn check_workbook(
    workbook: &Workbook,
    requests: &[CheckRequest],
) -> BTreeMap<&'static str, Vec<DocumentCheck>> {
    let mut out = BTreeMap::new();
    for req in requests {
        let Some(sheet) = workbook.sheet(req.sheet) else {
            debug!(sheet = req.sheet, "sheet absent, not checked");
            continue;
        };
        let failures = check_sheet(sheet, req.type_column, req.number_column, req.header_rows);
        debug!(sheet = req.sheet, failures = failures.len(), "documents checked");
        out.insert(req.sheet, failures);
    }
    out
}

/// Check every counterparty sheet of an inventories workbook.
pub fn check_inventories(workbook: &Workbook) -> BTreeMap<&'static str, Vec<DocumentCheck>> {
    check_workbook(workbook, &INVENTORY_REQUESTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Row};

    fn check(doc_type: &str, number: &str) -> bool {
        DocumentCheck::new(Some(doc_type.into()), number, 1).passes()
    }

    #[test]
    fn rules_per_type() {
        assert!(check("0", "ABC123"));
        assert!(!check("0", ""));
        assert!(!check("0", "ABC-123"));
        assert!(check("1", "44556677"));
        assert!(!check("1", "4455667"));
        assert!(check("4", "CE0012345678"));
        assert!(!check("7", "P00123456789X"));
        assert!(check("A", "123456789012345"));
        assert!(!check("9", "123"));
        assert!(!DocumentCheck::new(None, "123", 1).passes());
    }

    #[test]
    fn ruc_check_digit() {
        assert!(is_valid_ruc("20100066603"));
        assert!(is_valid_ruc("20131312955"));
        assert!(!is_valid_ruc("20131312956"));
        assert!(!is_valid_ruc("2013131295"));
        assert!(!is_valid_ruc("2013131295X"));
    }

    fn sheet(info: bool, rows: &[(&str, &str)]) -> Sheet {
        let mut all = vec![Row::new(vec![Cell::boolean(info)])];
        all.extend(std::iter::repeat_n(Row::default(), 4));
        for (t, n) in rows {
            all.push(Row::new(vec![Cell::text(*t), Cell::default(), Cell::text(*n)]));
        }
        Sheet::new("030300", all)
    }

    #[test]
    fn check_sheet_reports_sheet_rows() {
        let s = sheet(true, &[("6", "20100066603"), ("1", "123"), ("", ""), ("6", "20100066604")]);
        let failed = check_sheet(&s, 0, 2, 5);
        let rows: Vec<usize> = failed.iter().map(|f| f.row).collect();
        assert_eq!(rows, [7, 9]);
    }

    #[test]
    fn info_false_skips_sheet() {
        let s = sheet(false, &[("1", "123")]);
        assert!(check_sheet(&s, 0, 2, 5).is_empty());
    }

    #[test]
    fn absent_sheets_are_left_out() {
        let wb = Workbook::new(vec![sheet(true, &[("1", "1")])]);
        let result = check_inventories(&wb);
        assert_eq!(result.len(), 1);
        assert_eq!(result["030300"].len(), 1);
    }
}
