use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that abort an export.
///
/// Malformed cell contents are never reported here: the field formatter
/// substitutes documented defaults instead (see [`CellRead`](super::CellRead)).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A sheet the processor cannot work without is absent from the workbook.
    #[error("cannot find sheet with name: {0}")]
    MissingSheet(String),

    /// A header cell holding a book parameter is absent.
    #[error("cannot find cell at row {row}; column {column} in sheet {sheet}")]
    MissingCell {
        /// Sheet that was searched.
        sheet: String,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },

    /// Creating the target directory or writing an output file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A book whose content lives outside the workbook could not be obtained.
    #[error("attachment unavailable for book {book_id}: {reason}")]
    AttachmentUnavailable {
        /// Book code of the attachment.
        book_id: String,
        /// Why it could not be fetched.
        reason: String,
    },

    /// A workbook snapshot could not be decoded.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
