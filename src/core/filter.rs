use super::cell::Row;

/// Decides whether a data row takes part in a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter<'a> {
    /// Rejects rows whose first cell is blank.
    NonBlank,
    /// Non-blank rows whose trimmed text at `column` equals `expected`.
    ///
    /// `column: None` accepts every non-blank row (books without a
    /// discriminating flag column).
    FlagEquals {
        /// Column holding the flag.
        column: Option<usize>,
        /// Flag value to keep.
        expected: &'a str,
    },
    /// Rows with a non-blank line-item code at `column`.
    HasEntryId {
        /// Column holding the entry id.
        column: usize,
    },
    /// Non-blank rows whose trimmed first cell differs from `value`.
    ExcludeFirst {
        /// First-cell value to drop.
        value: &'a str,
    },
}

impl<'a> RowFilter<'a> {
    /// Filter on a flag column.
    pub const fn flag(column: usize, expected: &'a str) -> Self {
        Self::FlagEquals {
            column: Some(column),
            expected,
        }
    }

    /// True when `row` passes the filter.
    pub fn accepts(&self, row: &Row) -> bool {
        match *self {
            Self::NonBlank => !row.is_blank(),
            Self::FlagEquals { column, expected } => {
                if row.is_blank() {
                    return false;
                }
                let Some(column) = column else {
                    return true;
                };
                row.get(column)
                    .and_then(|c| c.formatted.as_deref())
                    .is_some_and(|t| t.trim() == expected)
            }
            Self::HasEntryId { column } => !row.cell(column).is_blank(),
            Self::ExcludeFirst { value } => {
                !row.is_blank() && row.cell(0).formatted.as_deref().map(str::trim) != Some(value)
            }
        }
    }
}
