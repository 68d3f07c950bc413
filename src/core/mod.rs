//! Spreadsheet model, field formatting, keys, naming and the export runner.
//!
//! Every book family (inventories, costs, assets, PDT extracts) is built from
//! the pieces in this module: rows are filtered by a [`RowFilter`], turned
//! into [`OutputLine`]s by a [`LineConverter`] and written to a file named by
//! [`BookNameBuilder`].

mod cell;
mod error;
mod export;
mod filter;
pub mod format;
mod keys;
mod line;
mod naming;
mod params;

pub use cell::*;
pub use error::*;
pub use export::*;
pub use filter::*;
pub use format::{
    BLANK_DATE, CellRead, date_text, decimal_text, digits_only, integer_of, number_of,
    sanitized, text_of, truncated_text, upper_text,
};
pub use keys::*;
pub use line::*;
pub use naming::*;
pub use params::*;
