use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Monotonic per-converter sequence, seeded at 0.
///
/// Increments are atomic, so a converter may be shared across threads.
#[derive(Debug, Default)]
pub struct Correlative {
    last: AtomicU64,
}

impl Correlative {
    /// A fresh counter; the first call to [`next`](Self::next) returns 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance and return the new value.
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Last issued value (0 before the first call).
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

/// Synthetic primary key of a book record: period, unique token, correlative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    /// Period identifier (e.g. `20231231`).
    pub period: String,
    /// Random token satisfying the uniqueness column.
    pub token: Uuid,
    /// Sequence number within the converter.
    pub correlative: u64,
}

impl PrimaryKey {
    /// Correlative rendered as `M` plus 9 zero-padded digits.
    pub fn correlative_code(&self) -> String {
        format!("M{:09}", self.correlative)
    }

    /// The three key fields in record order.
    pub fn fields(&self) -> [String; 3] {
        [
            self.period.clone(),
            self.token.to_string(),
            self.correlative_code(),
        ]
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.period, self.token, self.correlative_code())
    }
}

/// Issues [`PrimaryKey`]s for one converter.
#[derive(Debug)]
pub struct KeyGenerator {
    period: String,
    counter: Correlative,
}

impl KeyGenerator {
    /// Create a generator for the given period identifier.
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            counter: Correlative::new(),
        }
    }

    /// Issue the next key.
    pub fn next_key(&self) -> PrimaryKey {
        PrimaryKey {
            period: self.period.clone(),
            token: Uuid::new_v4(),
            correlative: self.counter.next(),
        }
    }

    /// Issue the next bare sequence code, zero-padded to `width` digits.
    pub fn next_sequence(&self, width: usize) -> String {
        format!("{:0>width$}", self.counter.next(), width = width)
    }

    /// Period identifier shared by every issued key.
    pub fn period(&self) -> &str {
        &self.period
    }

    /// Number of keys issued so far.
    pub fn issued(&self) -> u64 {
        self.counter.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlative_starts_at_one() {
        let c = Correlative::new();
        assert_eq!(c.current(), 0);
        assert_eq!(c.next(), 1);
        assert_eq!(c.next(), 2);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn keys_are_sequential_with_distinct_tokens() {
        let keys = KeyGenerator::new("20231231");
        let a = keys.next_key();
        let b = keys.next_key();
        assert_eq!(a.correlative_code(), "M000000001");
        assert_eq!(b.correlative_code(), "M000000002");
        assert_ne!(a.token, b.token);
        assert_eq!(a.period, "20231231");
    }

    #[test]
    fn generators_do_not_share_state() {
        let first = KeyGenerator::new("20230000");
        first.next_key();
        first.next_key();
        let second = KeyGenerator::new("20230000");
        assert_eq!(second.next_key().correlative, 1);
    }

    #[test]
    fn wide_sequence() {
        let keys = KeyGenerator::new("20230000");
        assert_eq!(keys.next_sequence(24), "000000000000000000000001");
        assert_eq!(keys.issued(), 1);
    }

    #[test]
    fn concurrent_increments_do_not_collide() {
        let keys = KeyGenerator::new("20231231");
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..250 {
                        keys.next_key();
                    }
                });
            }
        });
        assert_eq!(keys.issued(), 1000);
    }
}
