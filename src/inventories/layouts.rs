//! Record layouts of the inventories-and-balances books.
//!
//! Each function writes the fields that follow the key; column indexes are
//! zero-based positions in the source sheet.

use rust_decimal::RoundingStrategy;

use crate::core::format::{format_decimal, read_decimal};
use crate::core::{BookParameters, LineBuilder, OutputLine, Sheet, Terminator};

/// Financial statements (balance sheet, income statement, …).
pub(super) fn financial(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.push("01").text(2).amount(3);
}

/// 3.2 Cash and banks.
pub(super) fn cash_and_banks(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.digits(0)
        .text(1)
        .text(3)
        .text(4)
        .amount(5)
        .text(6)
        .push("1")
        .sanitized(7);
}

/// 3.3, 3.4, 3.5 Receivables (trade, personnel, others).
pub(super) fn receivable(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(2)
        .truncated(3, 100)
        .date(4)
        .amount(5)
        .push("1")
        .sanitized(6);
}

/// 3.6 Doubtful receivables.
pub(super) fn doubtful(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(2)
        .upper(3, 100)
        .text(4)
        .text(6)
        .text(7)
        .date(8)
        .amount(9)
        .push("1");
}

/// 3.7 Inventories.
pub(super) fn inventories(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(4)
        .text(2)
        .push("1")
        .text(3)
        .truncated(6, 80)
        .text(7)
        .text(9)
        .decimal(11, 8)
        .decimal(12, 8)
        .amount(13)
        .push("1");
}

/// 3.8 Investments.
pub(super) fn investments(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(2)
        .truncated(3, 100)
        .text(4)
        .amount(6)
        .integer(7)
        .amount(8)
        .amount(9)
        .push("1")
        .sanitized(10);
}

/// 3.9 Intangibles.
pub(super) fn intangibles(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.date(0)
        .digits(1)
        .truncated(2, 40)
        .amount(3)
        .amount(4)
        .push("1");
}

/// 3.11 Remunerations payable.
pub(super) fn remunerations(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.digits(0)
        .text(1)
        .text(3)
        .text(4)
        .truncated(5, 100)
        .amount(6)
        .push("1")
        .sanitized(7);
}

/// 3.12 Trade payables.
pub(super) fn trade_payable(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(2)
        .date(3)
        .truncated(4, 100)
        .amount(5)
        .push("1")
        .sanitized(6);
}

/// 3.13 Other payables.
pub(super) fn other_payable(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(2)
        .date(3)
        .upper(4, 100)
        .digits(5)
        .amount(6)
        .push("1");
}

/// 3.16.2 Shareholding structure.
pub(super) fn shareholders(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0)
        .text(2)
        .text(3)
        .truncated(5, 100)
        .integer(6)
        .decimal_half_up(7, 8)
        .push("1");
}

/// 3.17 Trial balance.
pub(super) fn trial_balance(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.text(0).amounts(2..=17).push("1");
}

/// 3.19 Statement of changes in equity.
pub(super) fn equity_changes(line: &mut LineBuilder<'_>, _: &BookParameters) {
    line.push("09").text(2).amounts(3..=14).push("1");
}

/// 3.16.1 Capital stock: one record from the amounts on the fourth row.
pub(super) fn capital_stock(sheet: &Sheet, params: &BookParameters) -> OutputLine {
    let mut fields = vec![params.period_id()];
    for column in 0..4 {
        let amount = sheet
            .cell(3, column)
            .map(|c| read_decimal(c).into_value())
            .unwrap_or_default();
        fields.push(format_decimal(amount, 2, RoundingStrategy::MidpointAwayFromZero));
    }
    fields.push("1".into());
    OutputLine::new(fields, Terminator::SeparatorCrlf)
}
