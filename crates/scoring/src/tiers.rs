//! Ordered tier tables.
//!
//! A table is a list of `(threshold, outcome)` rows evaluated top to bottom;
//! the first row whose threshold admits the value wins. Every table ends in an
//! `Otherwise` row, so selection is total (a `NaN` input lands there too).

/// The predicate of one tier row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// `value >= bound`
    AtLeast(f64),
    /// `value > bound`
    Above(f64),
    /// Always matches.
    Otherwise,
}

impl Threshold {
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Threshold::AtLeast(bound) => value >= bound,
            Threshold::Above(bound) => value > bound,
            Threshold::Otherwise => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier<T> {
    pub threshold: Threshold,
    pub outcome: T,
}

impl<T> Tier<T> {
    pub const fn at_least(bound: f64, outcome: T) -> Self {
        Self {
            threshold: Threshold::AtLeast(bound),
            outcome,
        }
    }

    pub const fn above(bound: f64, outcome: T) -> Self {
        Self {
            threshold: Threshold::Above(bound),
            outcome,
        }
    }

    pub const fn otherwise(outcome: T) -> Self {
        Self {
            threshold: Threshold::Otherwise,
            outcome,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TierTable<T: 'static> {
    tiers: &'static [Tier<T>],
}

impl<T> TierTable<T> {
    /// The last row must be `Otherwise`; tables are built from constants, so
    /// this is checked by the tests of each table rather than at runtime.
    pub const fn new(tiers: &'static [Tier<T>]) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &'static [Tier<T>] {
        self.tiers
    }

    /// The outcome of the first row that admits `value`.
    pub fn select(&self, value: f64) -> &'static T {
        let tiers = self.tiers;
        let matched = tiers.iter().find(|tier| tier.threshold.admits(value));
        match matched {
            Some(tier) => &tier.outcome,
            None => &tiers[tiers.len() - 1].outcome,
        }
    }
}

/// How a tier row transforms the score it is applied to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// `score + points`
    Add(f64),
    /// `score + (ceiling - score) * fraction`
    TowardCeiling(f64),
    /// `score * factor`
    Scale(f64),
}

impl Adjustment {
    pub fn apply(self, score: f64, ceiling: f64) -> f64 {
        match self {
            Adjustment::Add(points) => score + points,
            Adjustment::TowardCeiling(fraction) => score + (ceiling - score) * fraction,
            Adjustment::Scale(factor) => score * factor,
        }
    }
}
