//! PDT 710 annual return extracts.
//!
//! The receivable and payable books of the inventories workbook are turned
//! into per-field counterparty files, consolidated by the [`Collector`], and
//! the trial balance into the balance file of the return.
//!
//! Unlike the PLE books, an extract with nothing to declare produces no file
//! at all.
//!
//! # Example
//!
//! ```ignore
//! use librosple::core::BookProcessor;
//! use librosple::pdt::{PdtConfigBuilder, PdtProcessor};
//!
//! let config = PdtConfigBuilder::new().uit_multiplier(dec!(2)).build();
//! let files = PdtProcessor::new(config).process(&workbook, "out".as_ref())?;
//! ```

mod collector;
mod record;
mod trial;

pub use collector::{Collector, collect, uit_limit};
pub use record::{AggregationKey, COLLAPSED_TYPE, FieldRecord, FieldRecordBuilder, document_type};
pub use trial::TrialConverter;

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::format::decimal_from_f64;
use crate::core::{
    BookProcessor, ExportError, ExportedFile, Result, RowFilter, Sheet, Workbook, convert_rows,
    pdt_field_file_name, trial_balance_file_name, write_lines,
};

/// Header sheet holding the taxpayer, the year and the UIT.
pub const HEADER_SHEET: &str = "030000";

/// Trial balance sheet.
pub const TRIAL_SHEET: &str = "031700";

/// Sheets that must be present for the extract to run.
pub const REQUIRED_SHEETS: [&str; 6] = ["030300", "030500", "030600", "031200", "031300", TRIAL_SHEET];

/// Configuration for PDT 710 extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdtConfig {
    /// Factor applied to the UIT to obtain the small-value limit.
    pub uit_multiplier: Decimal,
    /// Decoration rows of the receivable and payable sheets.
    pub header_rows: usize,
    /// Decoration rows of the trial balance sheet.
    pub trial_header_rows: usize,
    /// Trial balance account left out of the balance file.
    pub excluded_trial_account: String,
}

impl Default for PdtConfig {
    fn default() -> Self {
        Self {
            uit_multiplier: dec!(2),
            header_rows: 5,
            trial_header_rows: 3,
            excluded_trial_account: "89".into(),
        }
    }
}

/// Builder for [`PdtConfig`].
#[derive(Debug, Default)]
pub struct PdtConfigBuilder {
    config: PdtConfig,
}

impl PdtConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the UIT multiplier.
    pub fn uit_multiplier(mut self, multiplier: Decimal) -> Self {
        self.config.uit_multiplier = multiplier;
        self
    }

    /// Set the decoration rows of the data sheets.
    pub fn header_rows(mut self, rows: usize) -> Self {
        self.config.header_rows = rows;
        self
    }

    /// Set the decoration rows of the trial balance sheet.
    pub fn trial_header_rows(mut self, rows: usize) -> Self {
        self.config.trial_header_rows = rows;
        self
    }

    /// Set the trial balance account to leave out.
    pub fn excluded_trial_account(mut self, account: impl Into<String>) -> Self {
        self.config.excluded_trial_account = account.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PdtConfig {
        self.config
    }
}

/// Values read from the header sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdtParams {
    /// Taxpayer id (RUC).
    pub taxpayer_id: String,
    /// Declared year.
    pub year: String,
    /// Tax unit value of the year.
    pub uit: Decimal,
}

impl PdtParams {
    /// Read taxpayer id (B5), year (B6) and UIT (B20) from the header sheet.
    pub fn from_header(sheet: &Sheet) -> Result<Self> {
        Ok(Self {
            taxpayer_id: sheet.string_at(4, 1)?,
            year: sheet.string_at(5, 1)?,
            uit: decimal_at(sheet, 19, 1)?,
        })
    }
}

fn decimal_at(sheet: &Sheet, row: usize, column: usize) -> Result<Decimal> {
    let cell = sheet.cell(row, column);
    cell.and_then(|c| c.as_number())
        .and_then(decimal_from_f64)
        .or_else(|| {
            cell.and_then(|c| c.formatted.as_deref())
                .and_then(|t| Decimal::from_str(t.trim()).ok())
        })
        .ok_or_else(|| ExportError::MissingCell {
            sheet: sheet.name.clone(),
            row,
            column,
        })
}

/// One counterparty extract drawn from a book sheet.
#[derive(Debug, Clone, Copy)]
pub struct FieldExtract {
    /// Source sheet.
    pub sheet: &'static str,
    /// PDT field number, part of the file name.
    pub field: u16,
    /// Rows that belong to this field.
    pub filter: RowFilter<'static>,
    /// Compare magnitudes against the limit.
    pub check_absolute: bool,
    /// Column layout of the source rows.
    pub record: FieldRecordBuilder,
}

const fn extract(
    sheet: &'static str,
    field: u16,
    flag_column: usize,
    flag: &'static str,
    record: FieldRecordBuilder,
) -> FieldExtract {
    FieldExtract {
        sheet,
        field,
        filter: RowFilter::flag(flag_column, flag),
        check_absolute: false,
        record,
    }
}

/// Every counterparty extract, in output order.
pub static PDT_FIELDS: &[FieldExtract] = &[
    extract("030300", 361, 7, "12", FieldRecordBuilder::RECEIVABLE),
    extract("030300", 362, 7, "13", FieldRecordBuilder::RECEIVABLE),
    extract("030500", 364, 7, "16", FieldRecordBuilder::RECEIVABLE),
    extract("030500", 365, 7, "17", FieldRecordBuilder::RECEIVABLE),
    FieldExtract {
        sheet: "030600",
        field: 367,
        filter: RowFilter::FlagEquals {
            column: None,
            expected: "",
        },
        check_absolute: true,
        record: FieldRecordBuilder::DOUBTFUL,
    },
    extract("031200", 404, 7, "42", FieldRecordBuilder::PAYABLE_TRADE),
    extract("031200", 405, 7, "43", FieldRecordBuilder::PAYABLE_TRADE),
    extract("031300", 407, 8, "46", FieldRecordBuilder::PAYABLE_OTHERS),
    extract("031300", 408, 8, "47", FieldRecordBuilder::PAYABLE_OTHERS),
];

/// Exports the PDT 710 extracts of an inventories workbook.
#[derive(Debug, Clone, Default)]
pub struct PdtProcessor {
    config: PdtConfig,
}

impl PdtProcessor {
    /// A processor with the given configuration.
    pub fn new(config: PdtConfig) -> Self {
        Self { config }
    }

    /// Consolidated records of one extract.
    pub fn collect_field(&self, extract: &FieldExtract, sheet: &Sheet, limit: Decimal) -> Vec<FieldRecord> {
        let records = sheet
            .data_rows(self.config.header_rows)
            .filter(|row| extract.filter.accepts(row))
            .map(|row| extract.record.build(row));
        collect(records, limit, extract.check_absolute)
    }

    fn export_field(
        &self,
        extract: &FieldExtract,
        sheet: &Sheet,
        params: &PdtParams,
        limit: Decimal,
        target: &Path,
    ) -> Result<Option<ExportedFile>> {
        let records = self.collect_field(extract, sheet, limit);
        if records.is_empty() {
            debug!(field = extract.field, "nothing to declare, no file written");
            return Ok(None);
        }
        let file_name = pdt_field_file_name(&params.year, &params.taxpayer_id, extract.field);
        let (path, lines) = write_lines(target, &file_name, records.iter().map(FieldRecord::to_line))?;
        info!(field = extract.field, lines, file = %path.display(), "extract written");
        Ok(Some(ExportedFile {
            book_id: extract.field.to_string(),
            path,
            info: true,
            lines,
        }))
    }

    fn export_trial(&self, sheet: &Sheet, params: &PdtParams, target: &Path) -> Result<ExportedFile> {
        let filter = RowFilter::ExcludeFirst {
            value: &self.config.excluded_trial_account,
        };
        let file_name = trial_balance_file_name(&params.taxpayer_id, &params.year);
        let lines = convert_rows(sheet, self.config.trial_header_rows, filter, &TrialConverter);
        let (path, lines) = write_lines(target, &file_name, lines)?;
        info!(lines, file = %path.display(), "trial balance written");
        Ok(ExportedFile {
            book_id: TRIAL_SHEET.to_string(),
            path,
            info: true,
            lines,
        })
    }
}

impl BookProcessor for PdtProcessor {
    fn title(&self) -> &'static str {
        "PDT 710 Renta Anual"
    }

    fn process(&self, workbook: &Workbook, target: &Path) -> Result<Vec<ExportedFile>> {
        let params = PdtParams::from_header(workbook.require_sheet(HEADER_SHEET)?)?;
        for name in REQUIRED_SHEETS {
            workbook.require_sheet(name)?;
        }
        let limit = uit_limit(params.uit, self.config.uit_multiplier);
        info!(
            taxpayer = %params.taxpayer_id,
            year = %params.year,
            %limit,
            "exporting PDT 710 extracts"
        );

        let mut written = Vec::new();
        for extract in PDT_FIELDS {
            let sheet = workbook.require_sheet(extract.sheet)?;
            if !sheet.info_flag() {
                debug!(sheet = extract.sheet, field = extract.field, "sheet declares no information");
                continue;
            }
            if let Some(file) = self.export_field(extract, sheet, &params, limit, target)? {
                written.push(file);
            }
        }

        let trial = workbook.require_sheet(TRIAL_SHEET)?;
        if trial.info_flag() {
            written.push(self.export_trial(trial, &params, target)?);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, Row};

    fn header(uit: Cell) -> Sheet {
        let mut rows = vec![Row::default(); 20];
        rows[4] = Row::new(vec![Cell::default(), Cell::text("20512345678")]);
        rows[5] = Row::new(vec![Cell::default(), Cell::text("2023")]);
        rows[19] = Row::new(vec![Cell::default(), uit]);
        Sheet::new(HEADER_SHEET, rows)
    }

    #[test]
    fn params_from_numeric_uit() {
        let p = PdtParams::from_header(&header(Cell::number(4950.0))).unwrap();
        assert_eq!(p.uit, dec!(4950));
        assert_eq!(p.year, "2023");
    }

    #[test]
    fn params_from_text_uit() {
        let p = PdtParams::from_header(&header(Cell::text(" 4950.50 "))).unwrap();
        assert_eq!(p.uit, dec!(4950.50));
    }

    #[test]
    fn missing_uit_is_fatal() {
        let err = PdtParams::from_header(&header(Cell::text("n/a"))).unwrap_err();
        assert!(matches!(err, ExportError::MissingCell { row: 19, column: 1, .. }));
    }

    #[test]
    fn config_builder() {
        let config = PdtConfigBuilder::new()
            .uit_multiplier(dec!(3))
            .header_rows(4)
            .trial_header_rows(2)
            .excluded_trial_account("79")
            .build();
        assert_eq!(config.uit_multiplier, dec!(3));
        assert_eq!(config.header_rows, 4);
        assert_eq!(config.trial_header_rows, 2);
        assert_eq!(config.excluded_trial_account, "79");
        assert_eq!(PdtConfig::default().uit_multiplier, dec!(2));
    }

    #[test]
    fn config_serde_round_trip() {
        let config = PdtConfigBuilder::new()
            .uit_multiplier(dec!(1.5))
            .excluded_trial_account("79")
            .build();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<PdtConfig>(&json).unwrap(), config);

        let partial: PdtConfig = serde_json::from_str(r#"{"header_rows": 4}"#).unwrap();
        assert_eq!(partial.header_rows, 4);
        assert_eq!(partial.excluded_trial_account, "89");
        assert_eq!(partial.uit_multiplier, dec!(2));
    }

    #[test]
    fn field_table_covers_every_data_sheet() {
        for sheet in &REQUIRED_SHEETS[..5] {
            assert!(PDT_FIELDS.iter().any(|f| f.sheet == *sheet), "{sheet}");
        }
        let doubtful: Vec<_> = PDT_FIELDS.iter().filter(|f| f.check_absolute).collect();
        assert_eq!(doubtful.len(), 1);
        assert_eq!(doubtful[0].field, 367);
    }

    #[test]
    fn collect_field_filters_by_flag() {
        let mut rows = vec![Row::default(); 5];
        let data = |num: &str, amount: f64, flag: &str| {
            Row::new(vec![
                Cell::text("6"),
                Cell::default(),
                Cell::text(num),
                Cell::text("Empresa SAC"),
                Cell::default(),
                Cell::number(amount),
                Cell::default(),
                Cell::text(flag),
            ])
        };
        rows.push(data("20100000001", 20000.0, "12"));
        rows.push(data("20100000002", 30000.0, "13"));
        rows.push(data("20100000001", 5000.0, "12"));
        let sheet = Sheet::new("030300", rows);
        let processor = PdtProcessor::default();
        let out = processor.collect_field(&PDT_FIELDS[0], &sheet, dec!(9900));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].amount, dec!(25000));
        assert_eq!(out[0].doc_number, "20100000001");
    }
}
