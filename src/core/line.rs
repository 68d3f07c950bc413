use std::fmt;

use super::cell::{Cell, Row};
use super::format;
use super::keys::PrimaryKey;

/// Field separator of every flat-file record.
pub const SEPARATOR: char = '|';

/// Record terminator mandated regardless of host platform.
pub const CRLF: &str = "\r\n";

/// How a record ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
    /// PLE records: the last field is closed by a separator, then CRLF.
    #[default]
    SeparatorCrlf,
    /// PDT field records: CRLF right after the last field.
    Crlf,
}

/// One formatted record, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    fields: Vec<String>,
    terminator: Terminator,
}

impl OutputLine {
    /// A line from already formatted fields.
    pub fn new(fields: Vec<String>, terminator: Terminator) -> Self {
        Self { fields, terminator }
    }

    /// The formatted fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the line has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record as written to disk, terminator included.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(field)?;
        }
        if self.terminator == Terminator::SeparatorCrlf {
            write!(f, "{SEPARATOR}")?;
        }
        f.write_str(CRLF)
    }
}

/// Accumulates the fields of one record from a source row.
///
/// Column-based methods read through the [`format`] rules, so a missing
/// column yields the same default as an empty cell.
pub struct LineBuilder<'r> {
    row: &'r Row,
    fields: Vec<String>,
}

impl<'r> LineBuilder<'r> {
    /// Start a record for `row`.
    pub fn new(row: &'r Row) -> Self {
        Self {
            row,
            fields: Vec::with_capacity(16),
        }
    }

    /// The source row.
    pub fn row(&self) -> &'r Row {
        self.row
    }

    fn cell(&self, column: usize) -> &'r Cell {
        self.row.cell(column)
    }

    /// Push a literal field.
    pub fn push(&mut self, value: impl Into<String>) -> &mut Self {
        self.fields.push(value.into());
        self
    }

    /// Push the three primary-key fields.
    pub fn key(&mut self, key: &PrimaryKey) -> &mut Self {
        self.fields.extend(key.fields());
        self
    }

    /// Displayed text of `column`.
    pub fn text(&mut self, column: usize) -> &mut Self {
        let value = format::text_of(self.cell(column));
        self.push(value)
    }

    /// Displayed text of each column in order.
    pub fn texts(&mut self, columns: &[usize]) -> &mut Self {
        for &column in columns {
            self.text(column);
        }
        self
    }

    /// Text of `column` cut to `max` characters.
    pub fn truncated(&mut self, column: usize, max: usize) -> &mut Self {
        let value = format::truncated_text(self.cell(column), max);
        self.push(value)
    }

    /// Upper-cased text of `column` cut to `max` characters.
    pub fn upper(&mut self, column: usize, max: usize) -> &mut Self {
        let value = format::upper_text(self.cell(column), max);
        self.push(value)
    }

    /// Text of `column` cut to `max` characters, `-` when the cell has no text.
    pub fn truncated_or_dash(&mut self, column: usize, max: usize) -> &mut Self {
        let value = match self.cell(column).formatted.as_deref() {
            Some(text) => format::truncate(text, max),
            None => "-".to_string(),
        };
        self.push(value)
    }

    /// Digits of `column`.
    pub fn digits(&mut self, column: usize) -> &mut Self {
        let value = format::digits_only(self.cell(column));
        self.push(value)
    }

    /// Amount of `column` with 2 decimals.
    pub fn amount(&mut self, column: usize) -> &mut Self {
        self.decimal(column, 2)
    }

    /// Amounts of an inclusive column range, 2 decimals each.
    pub fn amounts(&mut self, columns: std::ops::RangeInclusive<usize>) -> &mut Self {
        for column in columns {
            self.amount(column);
        }
        self
    }

    /// Number of `column` with `scale` decimals, rounding half-even.
    pub fn decimal(&mut self, column: usize, scale: u32) -> &mut Self {
        let value = format::decimal_text(self.cell(column), scale);
        self.push(value)
    }

    /// Number of `column` with `scale` decimals, rounding half away from zero.
    pub fn decimal_half_up(&mut self, column: usize, scale: u32) -> &mut Self {
        let value = format::decimal_text_half_up(self.cell(column), scale);
        self.push(value)
    }

    /// Amounts of an inclusive column range, 2 decimals rounding half-up.
    pub fn amounts_half_up(&mut self, columns: std::ops::RangeInclusive<usize>) -> &mut Self {
        for column in columns {
            self.decimal_half_up(column, 2);
        }
        self
    }

    /// Integer part of `column`.
    pub fn integer(&mut self, column: usize) -> &mut Self {
        let value = format::integer_of(self.cell(column)).to_string();
        self.push(value)
    }

    /// `dd/MM/uuuu` date of `column`.
    pub fn date(&mut self, column: usize) -> &mut Self {
        let value = format::date_text(self.cell(column));
        self.push(value)
    }

    /// Sanitized text of `column` (`/` → `-`, `-` when absent).
    pub fn sanitized(&mut self, column: usize) -> &mut Self {
        let value = format::sanitized(self.row, column);
        self.push(value)
    }

    /// Finish the record.
    pub fn finish(self, terminator: Terminator) -> OutputLine {
        OutputLine::new(self.fields, terminator)
    }
}
