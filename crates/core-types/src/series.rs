use crate::error::CoreError;
use crate::record::{MonthKey, MonthlyFinancialRecord};
use std::collections::BTreeMap;

/// An owned, sanitized, date-ordered series of monthly records with a
/// calendar index.
///
/// Engines address months by position (`i`) but resolve "N months ago" through
/// the calendar index, so a gap in the input reads as a missing month rather
/// than silently shifting every comparison by one.
#[derive(Debug, Clone, Default)]
pub struct FinancialSeries {
    records: Vec<MonthlyFinancialRecord>,
    index: BTreeMap<MonthKey, usize>,
}

impl FinancialSeries {
    /// Builds a series from caller-owned records without mutating them.
    ///
    /// Records are ordered by date; when two records fall in the same calendar
    /// month the later one in the input wins. Non-finite amounts become `0.0`.
    pub fn new(records: &[MonthlyFinancialRecord]) -> Self {
        let mut ordered: Vec<MonthlyFinancialRecord> = records.to_vec();
        ordered.sort_by_key(|r| r.date);

        let mut deduped: Vec<MonthlyFinancialRecord> = Vec::with_capacity(ordered.len());
        let mut replaced = 0;
        for mut record in ordered {
            replaced += record.sanitize();
            match deduped.last_mut() {
                Some(last) if last.month_key() == record.month_key() => {
                    tracing::warn!(
                        month = %record.month_key(),
                        dropped = %last.label,
                        kept = %record.label,
                        "Duplicate month in input; keeping the later record."
                    );
                    *last = record;
                }
                _ => deduped.push(record),
            }
        }

        if replaced > 0 {
            tracing::warn!(replaced, "Non-finite amounts in input were treated as 0.");
        }

        let index = deduped
            .iter()
            .enumerate()
            .map(|(i, r)| (r.month_key(), i))
            .collect();

        Self {
            records: deduped,
            index,
        }
    }

    /// Strict check that the input is already unique by month and strictly
    /// increasing, for callers that want to reject malformed uploads instead
    /// of having them repaired.
    pub fn validate(records: &[MonthlyFinancialRecord]) -> Result<(), CoreError> {
        for pair in records.windows(2) {
            let (previous, current) = (pair[0].month_key(), pair[1].month_key());
            if current == previous {
                return Err(CoreError::DuplicateMonth {
                    key: current,
                    label: pair[1].label.clone(),
                });
            }
            if current < previous {
                return Err(CoreError::OutOfOrder {
                    key: current,
                    previous,
                    label: pair[1].label.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&MonthlyFinancialRecord> {
        self.records.get(i)
    }

    pub fn last(&self) -> Option<&MonthlyFinancialRecord> {
        self.records.last()
    }

    pub fn key_at(&self, i: usize) -> Option<MonthKey> {
        self.records.get(i).map(MonthlyFinancialRecord::month_key)
    }

    pub fn by_month(&self, key: MonthKey) -> Option<&MonthlyFinancialRecord> {
        self.index.get(&key).map(|&i| &self.records[i])
    }

    /// The record `months` calendar months before the record at position `i`.
    pub fn months_before(&self, i: usize, months: u32) -> Option<&MonthlyFinancialRecord> {
        let key = self.key_at(i)?;
        self.by_month(key.offset(-(months as i32)))
    }

    /// The records of the `months` calendar months ending at `end`, oldest
    /// first. Months absent from the series are skipped.
    pub fn window_ending(
        &self,
        end: MonthKey,
        months: usize,
    ) -> impl Iterator<Item = &MonthlyFinancialRecord> + '_ {
        (0..months)
            .rev()
            .filter_map(move |back| self.by_month(end.offset(-(back as i32))))
    }

    /// Sums `value` over the `months` calendar months ending at `end`;
    /// absent months contribute 0.
    pub fn sum_window<F>(&self, end: MonthKey, months: usize, value: F) -> f64
    where
        F: Fn(&MonthlyFinancialRecord) -> f64,
    {
        self.window_ending(end, months).map(value).sum()
    }

    /// Sums `value` over the trailing `months` ending at position `i`.
    pub fn trailing_sum<F>(&self, i: usize, months: usize, value: F) -> f64
    where
        F: Fn(&MonthlyFinancialRecord) -> f64,
    {
        match self.key_at(i) {
            Some(key) => self.sum_window(key, months, value),
            None => 0.0,
        }
    }

    /// Extracts one field per month, in series order.
    pub fn column<F>(&self, value: F) -> Vec<f64>
    where
        F: Fn(&MonthlyFinancialRecord) -> f64,
    {
        self.records.iter().map(value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{flat_series, record};

    #[test]
    fn test_new_sorts_and_dedupes_without_touching_input() {
        let mut a = record(2024, 2);
        a.income.revenue = 200.0;
        let mut b = record(2024, 1);
        b.income.revenue = 100.0;
        let mut c = record(2024, 2);
        c.income.revenue = 250.0;
        c.label = "Feb 2024 (restated)".into();
        let input = vec![a, b, c];

        let series = FinancialSeries::new(&input);

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(0).unwrap().revenue(), 100.0);
        assert_eq!(series.get(1).unwrap().revenue(), 250.0);
        assert_eq!(input.len(), 3);
        assert_eq!(input[0].revenue(), 200.0);
    }

    #[test]
    fn test_new_sanitizes_copy_only() {
        let mut r = record(2024, 1);
        r.income.revenue = f64::NAN;
        let input = vec![r];

        let series = FinancialSeries::new(&input);

        assert_eq!(series.get(0).unwrap().revenue(), 0.0);
        assert!(input[0].revenue().is_nan());
    }

    #[test]
    fn test_validate() {
        let ok = vec![record(2024, 1), record(2024, 2)];
        assert!(FinancialSeries::validate(&ok).is_ok());

        let dup = vec![record(2024, 1), record(2024, 1)];
        assert!(matches!(
            FinancialSeries::validate(&dup),
            Err(CoreError::DuplicateMonth { .. })
        ));

        let backwards = vec![record(2024, 2), record(2024, 1)];
        assert!(matches!(
            FinancialSeries::validate(&backwards),
            Err(CoreError::OutOfOrder { .. })
        ));
    }

    #[test]
    fn test_months_before_uses_calendar_not_position() {
        // Jan..Jun 2023 with March missing.
        let input: Vec<_> = [1, 2, 4, 5, 6].iter().map(|&m| record(2023, m)).collect();
        let series = FinancialSeries::new(&input);

        // Position 2 is April; one month earlier is March, which is absent.
        assert!(series.months_before(2, 1).is_none());
        assert_eq!(
            series.months_before(2, 2).unwrap().month_key(),
            MonthKey::new(2023, 2)
        );
    }

    #[test]
    fn test_trailing_sum_skips_missing_months() {
        let series = FinancialSeries::new(&flat_series(6, 100.0));
        assert_eq!(series.trailing_sum(5, 12, |r| r.revenue()), 600.0);
        assert_eq!(series.trailing_sum(5, 3, |r| r.revenue()), 300.0);
        assert_eq!(series.trailing_sum(99, 3, |r| r.revenue()), 0.0);
    }
}
