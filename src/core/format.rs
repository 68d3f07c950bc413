//! Field formatting rules for flat-file records.
//!
//! Every function here is total: absent or malformed input degrades to a
//! documented default instead of failing, so a single odd cell never aborts
//! a bulk conversion. The `read_*` variants return a [`CellRead`] that also
//! tells whether the default was substituted.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::cell::{Cell, Row};

/// Sentinel emitted for blank date cells.
pub const BLANK_DATE: &str = "00/00/0000";

/// Outcome of reading a cell: always a value, plus whether it was defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRead<T> {
    value: T,
    defaulted: bool,
}

impl<T> CellRead<T> {
    /// A value taken from the cell itself.
    pub fn present(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    /// A value substituted because the cell had nothing usable.
    pub fn default_of(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }

    /// True when the value is a substitute rather than the cell's content.
    pub fn is_default(&self) -> bool {
        self.defaulted
    }

    /// Borrow the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Take the value, discarding the provenance.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the provenance.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CellRead<U> {
        CellRead {
            value: f(self.value),
            defaulted: self.defaulted,
        }
    }
}

/// Effective number of a cell.
pub fn read_number(cell: &Cell) -> CellRead<f64> {
    match cell.as_number() {
        Some(n) => CellRead::present(n),
        None => CellRead::default_of(0.0),
    }
}

/// Effective number truncated toward zero (saturating at the `i64` range).
pub fn read_integer(cell: &Cell) -> CellRead<i64> {
    read_number(cell).map(|n| n as i64)
}

/// Effective number as an exact decimal.
///
/// The conversion goes through the shortest text that round-trips the
/// double, so `0.1` becomes `0.1` and not its binary expansion. Finite
/// doubles beyond the [`Decimal`] range saturate at [`Decimal::MAX`] or
/// [`Decimal::MIN`].
pub fn read_decimal(cell: &Cell) -> CellRead<Decimal> {
    match cell.as_number().and_then(decimal_from_f64) {
        Some(d) => CellRead::present(d),
        None => CellRead::default_of(Decimal::ZERO),
    }
}

/// Re-slice a `dd-MM-uuuu` text into `dd/MM/uuuu`.
///
/// Blank cells yield [`BLANK_DATE`]. This is a positional slice, not a
/// calendar parse: text too short to slice also yields [`BLANK_DATE`]
/// (flagged as defaulted), and any other shape comes out reordered as-is.
pub fn read_date(cell: &Cell) -> CellRead<String> {
    let Some(text) = cell.formatted.as_deref().filter(|t| !t.trim().is_empty()) else {
        return CellRead::default_of(BLANK_DATE.to_string());
    };
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 10 {
        return CellRead::default_of(BLANK_DATE.to_string());
    }
    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();
    CellRead::present(format!(
        "{}/{}/{}",
        slice(0, 2),
        slice(3, 5),
        slice(6, 10)
    ))
}

/// Effective number, or `0.0`.
pub fn number_of(cell: &Cell) -> f64 {
    read_number(cell).into_value()
}

/// Effective number truncated toward zero, or `0`.
pub fn integer_of(cell: &Cell) -> i64 {
    read_integer(cell).into_value()
}

/// Effective number with exactly `scale` fractional digits, rounding half-even.
///
/// Absent numbers print as zero (`"0.00"` for scale 2).
pub fn decimal_text(cell: &Cell, scale: u32) -> String {
    format_decimal(
        read_decimal(cell).into_value(),
        scale,
        RoundingStrategy::MidpointNearestEven,
    )
}

/// Like [`decimal_text`] but rounding half away from zero.
pub fn decimal_text_half_up(cell: &Cell, scale: u32) -> String {
    format_decimal(
        read_decimal(cell).into_value(),
        scale,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// `dd/MM/uuuu` date text, or [`BLANK_DATE`].
pub fn date_text(cell: &Cell) -> String {
    read_date(cell).into_value()
}

/// Displayed text, or the empty string.
pub fn text_of(cell: &Cell) -> String {
    cell.formatted.clone().unwrap_or_default()
}

/// Displayed text cut to at most `max_len` characters. Never pads.
pub fn truncated_text(cell: &Cell, max_len: usize) -> String {
    truncate(cell.formatted.as_deref().unwrap_or(""), max_len)
}

/// Upper-cased displayed text cut to at most `max_len` characters.
pub fn upper_text(cell: &Cell, max_len: usize) -> String {
    truncate_upper(cell.formatted.as_deref().unwrap_or(""), max_len)
}

/// Only the digits of the displayed text.
pub fn digits_only(cell: &Cell) -> String {
    cell.formatted
        .as_deref()
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

/// Text at `column` with `/` replaced by `-`; `"-"` when there is none.
pub fn sanitized(row: &Row, column: usize) -> String {
    row.get(column)
        .and_then(|c| c.formatted.as_deref())
        .map(|t| t.replace('/', "-"))
        .unwrap_or_else(|| "-".to_string())
}

/// Cut `s` to at most `max` characters.
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Upper-case `s`, then cut it to at most `max` characters.
pub fn truncate_upper(s: &str, max: usize) -> String {
    s.to_uppercase().chars().take(max).collect()
}

/// Render `d` with exactly `scale` fractional digits and `.` as separator.
pub fn format_decimal(d: Decimal, scale: u32, strategy: RoundingStrategy) -> String {
    let mut rounded = d.round_dp_with_strategy(scale, strategy);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    format!("{:.prec$}", rounded, prec = scale as usize)
}

pub(crate) fn decimal_from_f64(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    Decimal::from_str(&n.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(n))
        .or_else(|| match n {
            n if n >= 1.0 => Some(Decimal::MAX),
            n if n <= -1.0 => Some(Decimal::MIN),
            _ => None,
        })
}
