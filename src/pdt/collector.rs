//! Threshold-based consolidation of PDT extract records.
//!
//! Records are grouped by [`AggregationKey`] in first-seen order. Once every
//! record is in, groups below the UIT limit are folded into one `99` record
//! when there is more than one of them, and every amount is made absolute.
//!
//! Sums saturate at the [`Decimal`] bounds instead of overflowing.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use super::record::{AggregationKey, FieldRecord};

/// Small-value threshold: `multiplier × uit`, rounded to cents half-up.
pub fn uit_limit(uit: Decimal, multiplier: Decimal) -> Decimal {
    let limit = uit.checked_mul(multiplier).unwrap_or_else(|| {
        warn!(%uit, %multiplier, "small-value limit overflows, saturating");
        uit.saturating_mul(multiplier)
    });
    limit.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn saturating_sum(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!(%total, %amount, "amount sum overflows, saturating");
        total.saturating_add(amount)
    })
}

/// Accumulates field records and applies the small-value fold.
#[derive(Debug, Clone)]
pub struct Collector {
    limit: Decimal,
    check_absolute: bool,
    index: HashMap<AggregationKey, usize>,
    records: Vec<FieldRecord>,
}

impl Collector {
    /// A collector comparing amounts against `limit`.
    ///
    /// With `check_absolute` the magnitude is compared, otherwise the signed
    /// amount (so every negative group counts as small).
    pub fn new(limit: Decimal, check_absolute: bool) -> Self {
        Self {
            limit,
            check_absolute,
            index: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Add a record, summing its amount into an existing group if any.
    pub fn push(&mut self, record: FieldRecord) {
        let key = record.key();
        match self.index.get(&key) {
            Some(&at) => {
                let merged = &mut self.records[at];
                merged.amount = saturating_sum(merged.amount, record.amount);
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    /// Number of distinct groups so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn is_small(&self, amount: Decimal) -> bool {
        let measured = if self.check_absolute { amount.abs() } else { amount };
        measured < self.limit
    }

    /// Fold small groups and normalise signs.
    ///
    /// Survivors keep first-seen order; the `99` record, when created, comes
    /// last. A single small group is left as it is.
    pub fn finish(self) -> Vec<FieldRecord> {
        let small = self
            .records
            .iter()
            .filter(|r| self.is_small(r.amount))
            .count();

        let mut out = if small > 1 {
            let (folded, mut kept): (Vec<_>, Vec<_>) = self
                .records
                .iter()
                .cloned()
                .partition(|r| self.is_small(r.amount));
            let total = folded
                .iter()
                .fold(Decimal::ZERO, |total, r| saturating_sum(total, r.amount));
            debug!(folded = folded.len(), %total, "small amounts collapsed");
            kept.push(FieldRecord::collapsed(total));
            kept
        } else {
            self.records
        };

        for record in &mut out {
            record.amount = record.amount.abs();
        }
        out
    }
}

impl Extend<FieldRecord> for Collector {
    fn extend<I: IntoIterator<Item = FieldRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

/// Group, fold and normalise `records` in one call.
pub fn collect<I>(records: I, limit: Decimal, check_absolute: bool) -> Vec<FieldRecord>
where
    I: IntoIterator<Item = FieldRecord>,
{
    let mut collector = Collector::new(limit, check_absolute);
    collector.extend(records);
    collector.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(number: &str, amount: Decimal) -> FieldRecord {
        FieldRecord::new("06", number, amount)
    }

    fn summary(records: &[FieldRecord]) -> Vec<(&str, &str, Decimal)> {
        records
            .iter()
            .map(|r| (r.doc_type.as_str(), r.doc_number.as_str(), r.amount))
            .collect()
    }

    #[test]
    fn limit_rounds_half_up() {
        assert_eq!(uit_limit(dec!(4950), dec!(2)), dec!(9900.00));
        assert_eq!(uit_limit(dec!(0.0025), dec!(2)), dec!(0.01));
    }

    #[test]
    fn merges_equal_keys_and_keeps_lone_small_record() {
        let out = collect(
            [rec("A", dec!(5)), rec("A", dec!(7)), rec("B", dec!(1))],
            dec!(10),
            false,
        );
        assert_eq!(
            summary(&out),
            [("06", "A", dec!(12)), ("06", "B", dec!(1))]
        );
    }

    #[test]
    fn collapses_several_small_records() {
        let out = collect(
            [rec("A", dec!(1)), rec("B", dec!(2)), rec("C", dec!(3))],
            dec!(10),
            false,
        );
        assert_eq!(summary(&out), [("99", "", dec!(6))]);
    }

    #[test]
    fn collapsed_record_goes_last() {
        let out = collect(
            [
                rec("A", dec!(1)),
                rec("BIG", dec!(500)),
                rec("B", dec!(2)),
                rec("BIGGER", dec!(900)),
            ],
            dec!(10),
            false,
        );
        assert_eq!(
            summary(&out),
            [
                ("06", "BIG", dec!(500)),
                ("06", "BIGGER", dec!(900)),
                ("99", "", dec!(3)),
            ]
        );
    }

    #[test]
    fn absolute_check_keeps_large_negative() {
        let out = collect([rec("A", dec!(-50))], dec!(10), true);
        assert_eq!(summary(&out), [("06", "A", dec!(50))]);
    }

    #[test]
    fn signed_check_treats_negatives_as_small() {
        let out = collect(
            [rec("A", dec!(-50)), rec("B", dec!(-70)), rec("C", dec!(20))],
            dec!(10),
            false,
        );
        assert_eq!(
            summary(&out),
            [("06", "C", dec!(20)), ("99", "", dec!(120))]
        );
    }

    #[test]
    fn amount_equal_to_limit_is_not_small() {
        let out = collect([rec("A", dec!(10)), rec("B", dec!(10))], dec!(10), false);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let huge = dec!(50000000000000000000000000000);
        let out = collect([rec("A", huge), rec("A", huge)], dec!(10), false);
        assert_eq!(summary(&out), [("06", "A", Decimal::MAX)]);

        let out = collect(
            [rec("A", -huge), rec("B", -huge), rec("C", dec!(20))],
            dec!(10),
            false,
        );
        assert_eq!(
            summary(&out),
            [("06", "C", dec!(20)), ("99", "", Decimal::MAX)]
        );

        assert_eq!(uit_limit(Decimal::MAX, dec!(2)), Decimal::MAX);
    }

    #[test]
    fn empty_input() {
        assert!(collect(Vec::new(), dec!(10), true).is_empty());
        assert!(Collector::new(dec!(1), false).is_empty());
    }
}
