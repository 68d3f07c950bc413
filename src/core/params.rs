use serde::{Deserialize, Serialize};

use super::cell::Sheet;
use super::error::Result;
use super::naming::BookNameBuilder;

/// Taxpayer and period context shared by every converter of one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookParameters {
    /// Taxpayer id (RUC).
    pub taxpayer_id: String,
    /// Period year.
    pub year: String,
    /// Period month (`00` for annual books).
    pub month: String,
    /// Period day (`00` for annual books).
    pub day: String,
    /// Oportunity code.
    pub oportunity: String,
    /// Operations flag.
    pub ops_flag: String,
    /// Extension of compiled book file names.
    pub extension: String,
}

impl Default for BookParameters {
    fn default() -> Self {
        Self {
            taxpayer_id: String::new(),
            year: String::new(),
            month: "00".into(),
            day: "00".into(),
            oportunity: "00".into(),
            ops_flag: "1".into(),
            extension: "txt".into(),
        }
    }
}

impl BookParameters {
    /// Read the inventories-and-balances header sheet (`030000`).
    ///
    /// Column B holds the values: taxpayer id at row 5, then year, month,
    /// day and oportunity on the rows below; the operations flag is at row 16.
    pub fn from_inventory_header(sheet: &Sheet) -> Result<Self> {
        Ok(Self {
            taxpayer_id: sheet.string_at(4, 1)?,
            year: sheet.string_at(5, 1)?,
            month: sheet.string_at(6, 1)?,
            day: sheet.string_at(7, 1)?,
            oportunity: sheet.string_at(8, 1)?,
            ops_flag: sheet.string_at(15, 1)?,
            extension: "txt".into(),
        })
    }

    /// Read an annual book header sheet (`LE100000`, `070000`): taxpayer id,
    /// year and operations flag on rows 5 to 7 of column B.
    pub fn from_annual_header(sheet: &Sheet) -> Result<Self> {
        Ok(Self {
            taxpayer_id: sheet.string_at(4, 1)?,
            year: sheet.string_at(5, 1)?,
            ops_flag: sheet.string_at(6, 1)?,
            extension: "TXT".into(),
            ..Default::default()
        })
    }

    /// Period identifier `yyyyMMdd` used as the first field of records.
    pub fn period_id(&self) -> String {
        format!("{}{}{}", self.year, self.month, self.day)
    }

    /// Name builder pre-filled with these parameters.
    pub fn book_name(&self, book_id: &str, info: bool) -> BookNameBuilder {
        BookNameBuilder::new(&self.taxpayer_id, &self.year, book_id)
            .month(&self.month)
            .day(&self.day)
            .oportunity(&self.oportunity)
            .ops_flag(&self.ops_flag)
            .info(info)
            .extension(&self.extension)
    }

    /// Compiled file name of `book_id`.
    pub fn file_name(&self, book_id: &str, info: bool) -> String {
        self.book_name(book_id, info).build()
    }
}

/// Builder for [`BookParameters`].
///
/// # Example
///
/// ```
/// use librosple::core::BookParametersBuilder;
///
/// let params = BookParametersBuilder::new("20512345678", "2023")
///     .month("12")
///     .day("31")
///     .build();
/// assert_eq!(params.period_id(), "20231231");
/// ```
pub struct BookParametersBuilder {
    params: BookParameters,
}

impl BookParametersBuilder {
    /// Start with the taxpayer id and year.
    pub fn new(taxpayer_id: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            params: BookParameters {
                taxpayer_id: taxpayer_id.into(),
                year: year.into(),
                ..Default::default()
            },
        }
    }

    /// Set the period month.
    pub fn month(mut self, month: impl Into<String>) -> Self {
        self.params.month = month.into();
        self
    }

    /// Set the period day.
    pub fn day(mut self, day: impl Into<String>) -> Self {
        self.params.day = day.into();
        self
    }

    /// Set the oportunity code.
    pub fn oportunity(mut self, oportunity: impl Into<String>) -> Self {
        self.params.oportunity = oportunity.into();
        self
    }

    /// Set the operations flag.
    pub fn ops_flag(mut self, ops_flag: impl Into<String>) -> Self {
        self.params.ops_flag = ops_flag.into();
        self
    }

    /// Set the file name extension.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.params.extension = extension.into();
        self
    }

    /// Build the parameters.
    pub fn build(self) -> BookParameters {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, ExportError, Row};

    fn header(values: &[(usize, &str)]) -> Sheet {
        let mut rows = vec![Row::default(); 20];
        for &(row, value) in values {
            rows[row] = Row::new(vec![Cell::text("label"), Cell::text(value)]);
        }
        Sheet::new("030000", rows)
    }

    #[test]
    fn inventory_header() {
        let sheet = header(&[
            (4, "20512345678"),
            (5, "2023"),
            (6, "12"),
            (7, "31"),
            (8, "01"),
            (15, "1"),
        ]);
        let p = BookParameters::from_inventory_header(&sheet).unwrap();
        assert_eq!(p.period_id(), "20231231");
        assert_eq!(
            p.file_name("030300", true),
            "LE2051234567820231231030300011111.txt"
        );
    }

    #[test]
    fn annual_header_defaults() {
        let sheet = header(&[(4, "20512345678"), (5, "2023"), (6, "1")]);
        let p = BookParameters::from_annual_header(&sheet).unwrap();
        assert_eq!(p.period_id(), "20230000");
        assert_eq!(
            p.file_name("100100", false),
            "LE2051234567820230000100100001011.TXT"
        );
    }

    #[test]
    fn missing_header_cell_is_fatal() {
        let sheet = header(&[(4, "20512345678")]);
        let err = BookParameters::from_annual_header(&sheet).unwrap_err();
        assert!(matches!(err, ExportError::MissingCell { row: 5, column: 1, .. }));
    }
}
