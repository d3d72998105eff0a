use core_types::MonthlyFinancialRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

/// A content hash of a record slice, for callers that memoize bundles.
///
/// Covers every label, date and amount (by bit pattern, so `0.0` and `-0.0`
/// differ). Stable within one build of the program, not across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesFingerprint(u64);

impl SeriesFingerprint {
    pub fn of(records: &[MonthlyFinancialRecord]) -> Self {
        let mut hasher = DefaultHasher::new();
        records.len().hash(&mut hasher);
        for record in records {
            record.label.hash(&mut hasher);
            record.date.hash(&mut hasher);
            for amount in record.amounts() {
                amount.to_bits().hash(&mut hasher);
            }
        }
        Self(hasher.finish())
    }
}

impl fmt::Display for SeriesFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::fixtures::flat_series;

    #[test]
    fn test_equal_input_equal_fingerprint() {
        let a = flat_series(14, 1000.0);
        let b = flat_series(14, 1000.0);
        assert_eq!(SeriesFingerprint::of(&a), SeriesFingerprint::of(&b));
    }

    #[test]
    fn test_any_edit_changes_fingerprint() {
        let base = flat_series(14, 1000.0);
        let original = SeriesFingerprint::of(&base);

        let mut edited = base.clone();
        edited[3].balance.inventory += 0.01;
        assert_ne!(SeriesFingerprint::of(&edited), original);

        let mut relabeled = base.clone();
        relabeled[0].label = "Opening".to_string();
        assert_ne!(SeriesFingerprint::of(&relabeled), original);

        let mut shorter = base.clone();
        shorter.pop();
        assert_ne!(SeriesFingerprint::of(&shorter), original);

        let mut longer = base.clone();
        longer.push(base[13].clone());
        assert_ne!(SeriesFingerprint::of(&longer), original);
    }

    #[test]
    fn test_display_is_fixed_width_hex() {
        let text = SeriesFingerprint::of(&[]).to_string();
        assert_eq!(text.len(), 16);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
