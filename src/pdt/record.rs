use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::format::{format_decimal, read_decimal, truncate_upper};
use crate::core::{OutputLine, Row, Terminator};

/// Document type of the synthetic record that folds small amounts.
pub const COLLAPSED_TYPE: &str = "99";

/// Map a PLE identity-document code to its PDT 710 code.
pub fn document_type(code: &str) -> &'static str {
    match code {
        "1" => "01",
        "4" => "04",
        "6" => "06",
        "7" => "07",
        "A" => "A",
        _ => "00",
    }
}

/// Identity of a counterparty inside one extract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AggregationKey {
    /// PDT document type.
    pub doc_type: String,
    /// Document number.
    pub doc_number: String,
}

/// One counterparty line of a PDT 710 extract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldRecord {
    /// PDT document type (`01`, `04`, `06`, `07`, `A`, `00` or `99`).
    pub doc_type: String,
    /// Document number.
    pub doc_number: String,
    /// `0` for legal persons, `1` for natural persons.
    pub input_flag: String,
    /// First last name.
    pub last_name_1: String,
    /// Second last name.
    pub last_name_2: String,
    /// Given names.
    pub name: String,
    /// Company name.
    pub legal_name: String,
    /// Signed amount; made absolute by the collector.
    pub amount: Decimal,
}

impl FieldRecord {
    /// A record for `doc_type`/`doc_number` with no name and the given amount.
    pub fn new(doc_type: impl Into<String>, doc_number: impl Into<String>, amount: Decimal) -> Self {
        Self {
            doc_type: doc_type.into(),
            doc_number: doc_number.into(),
            amount,
            ..Default::default()
        }
    }

    /// The synthetic record standing for several small amounts.
    pub fn collapsed(amount: Decimal) -> Self {
        Self::new(COLLAPSED_TYPE, "", amount)
    }

    /// Grouping identity.
    pub fn key(&self) -> AggregationKey {
        AggregationKey {
            doc_type: self.doc_type.clone(),
            doc_number: self.doc_number.clone(),
        }
    }

    /// True for a legal person: a RUC starting with `20`, or an unknown
    /// document type.
    pub fn is_company(&self) -> bool {
        (self.doc_type == "06" && self.doc_number.starts_with("20")) || self.doc_type == "00"
    }

    /// Fill the name fields from the full counterparty name.
    ///
    /// Companies keep the text as legal name. Persons are split into
    /// `LAST1 LAST2, NAMES`, or positionally `LAST1 LAST2 NAMES` /
    /// `LAST1 NAMES` when there is no comma. A single word fills no name
    /// part.
    pub fn set_name(&mut self, full: &str) {
        if self.is_company() {
            self.input_flag = "0".into();
            self.legal_name = full.to_string();
            return;
        }
        self.input_flag = "1".into();
        if let Some((last, names)) = full.split_once(',') {
            let names = names.split(',').next().unwrap_or_default();
            self.name = names.trim().to_string();
            let mut parts = last.trim().splitn(2, ' ');
            self.last_name_1 = parts.next().unwrap_or_default().to_string();
            self.last_name_2 = parts.next().unwrap_or_default().trim().to_string();
        } else {
            let parts: Vec<&str> = full.trim().splitn(3, ' ').collect();
            match parts.as_slice() {
                [last1, last2, names] => {
                    self.last_name_1 = last1.to_string();
                    self.last_name_2 = last2.to_string();
                    self.name = names.trim().to_string();
                }
                [last1, names] => {
                    self.last_name_1 = last1.to_string();
                    self.name = names.to_string();
                }
                _ => {}
            }
        }
    }

    /// Render as an extract line (no closing separator).
    pub fn to_line(&self) -> OutputLine {
        OutputLine::new(
            vec![
                self.doc_type.clone(),
                self.doc_number.clone(),
                self.input_flag.clone(),
                truncate_upper(&self.last_name_1, 20),
                truncate_upper(&self.last_name_2, 20),
                truncate_upper(&self.name, 20),
                truncate_upper(&self.legal_name, 40),
                format_decimal(self.amount, 0, RoundingStrategy::MidpointAwayFromZero),
            ],
            Terminator::Crlf,
        )
    }
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_line(), f)
    }
}

/// Builds a [`FieldRecord`] from a sheet row.
///
/// Document type and number are always in columns 0 and 2; the name and
/// amount columns depend on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRecordBuilder {
    /// Column with the counterparty name.
    pub name_column: usize,
    /// Column with the amount.
    pub amount_column: usize,
}

impl FieldRecordBuilder {
    /// Trade, personnel and other receivables.
    pub const RECEIVABLE: Self = Self::new(3, 5);
    /// Doubtful receivables.
    pub const DOUBTFUL: Self = Self::new(3, 9);
    /// Trade payables.
    pub const PAYABLE_TRADE: Self = Self::new(4, 5);
    /// Other payables.
    pub const PAYABLE_OTHERS: Self = Self::new(4, 6);

    /// A builder reading the given columns.
    pub const fn new(name_column: usize, amount_column: usize) -> Self {
        Self {
            name_column,
            amount_column,
        }
    }

    /// Build the record of `row`. Missing amounts count as zero.
    pub fn build(&self, row: &Row) -> FieldRecord {
        let code = row.cell(0).formatted.as_deref().unwrap_or_default();
        let mut record = FieldRecord::new(
            document_type(code),
            row.cell(2).formatted.clone().unwrap_or_default(),
            read_decimal(row.cell(self.amount_column)).into_value(),
        );
        let full = row.cell(self.name_column).formatted.as_deref().unwrap_or_default();
        record.set_name(full);
        record
    }
}
