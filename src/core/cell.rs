//! In-memory spreadsheet model handed over by the input collaborator.

use serde::{Deserialize, Serialize};

use super::error::{ExportError, Result};

/// Effective (typed) value of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellValue {
    /// Numeric value as computed by the spreadsheet.
    Number(f64),
    /// Checkbox or boolean formula result.
    Bool(bool),
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Text as displayed by the spreadsheet.
    #[serde(default)]
    pub formatted: Option<String>,
    /// Typed value behind the displayed text.
    #[serde(default)]
    pub value: Option<CellValue>,
}

static EMPTY_CELL: Cell = Cell {
    formatted: None,
    value: None,
};

impl Cell {
    /// A cell with displayed text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            formatted: Some(text.into()),
            value: None,
        }
    }

    /// A numeric cell; its displayed text is the plain decimal rendering.
    pub fn number(value: f64) -> Self {
        Self {
            formatted: Some(value.to_string()),
            value: Some(CellValue::Number(value)),
        }
    }

    /// A boolean cell, displayed as `TRUE`/`FALSE`.
    pub fn boolean(value: bool) -> Self {
        Self {
            formatted: Some(if value { "TRUE" } else { "FALSE" }.into()),
            value: Some(CellValue::Bool(value)),
        }
    }

    /// The shared empty cell returned for out-of-range lookups.
    pub fn empty() -> &'static Cell {
        &EMPTY_CELL
    }

    /// Effective numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            Some(CellValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Effective boolean value, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Some(CellValue::Bool(b)) => Some(b),
            _ => None,
        }
    }

    /// True when the displayed text is absent or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.formatted.as_deref().is_none_or(|t| t.trim().is_empty())
    }
}

/// An ordered row of cells; insertion order is column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Cell>);

impl Row {
    /// Build a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Cell at `column`, or the empty cell when the row is shorter.
    pub fn cell(&self, column: usize) -> &Cell {
        self.0.get(column).unwrap_or(Cell::empty())
    }

    /// Cell at `column` only when the row actually has it.
    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.0.get(column)
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the row has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A row is blank when its first cell carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.0.first().is_none_or(Cell::is_blank)
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self(cells)
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A named worksheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet title; for book sheets this is the book code (e.g. `030300`).
    pub name: String,
    /// Grid rows, top to bottom.
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from its rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Information flag stored in A1.
    ///
    /// `true` means the sheet carries data; `false` means the book is still
    /// produced, but empty. A missing or non-boolean A1 reads as `false`.
    pub fn info_flag(&self) -> bool {
        let Some(a1) = self.rows.first().and_then(|row| row.get(0)) else {
            return false;
        };
        match a1.as_bool() {
            Some(flag) => flag,
            None => a1
                .formatted
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("true")),
        }
    }

    /// Cell at (`row`, `column`), if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Displayed text at (`row`, `column`); the cell must exist.
    pub fn string_at(&self, row: usize, column: usize) -> Result<String> {
        self.cell(row, column)
            .and_then(|c| c.formatted.clone())
            .ok_or_else(|| ExportError::MissingCell {
                sheet: self.name.clone(),
                row,
                column,
            })
    }

    /// Rows left after skipping `header` decoration rows.
    pub fn data_rows(&self, header: usize) -> impl Iterator<Item = &Row> {
        self.rows.iter().skip(header)
    }
}

/// The whole spreadsheet document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in tab order.
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook from its sheets.
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// First sheet with the given title.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// First sheet with the given title, or [`ExportError::MissingSheet`].
    pub fn require_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheet(name)
            .ok_or_else(|| ExportError::MissingSheet(name.to_string()))
    }

    /// Decode a workbook snapshot serialized as JSON.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
