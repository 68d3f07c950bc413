use crate::core::{LineBuilder, LineConverter, OutputLine, Row, Terminator};

/// Converts trial balance rows into PDT 710 balance lines.
///
/// Account, opening debit/credit, movements debit/credit and closing
/// balances as whole numbers; the two trailing adjustment columns are
/// always zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrialConverter;

impl LineConverter for TrialConverter {
    fn convert(&self, row: &Row) -> OutputLine {
        let mut line = LineBuilder::new(row);
        line.text(0);
        for column in [2, 3, 4, 5, 10, 11] {
            line.integer(column);
        }
        line.push("0").push("0");
        line.finish(Terminator::SeparatorCrlf)
    }
}
