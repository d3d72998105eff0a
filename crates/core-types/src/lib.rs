//! # FinHealth Core Types
//!
//! The Layer 0 vocabulary of the workspace: the canonical monthly financial
//! record, the calendar-indexed series every engine reads from, and the small
//! set of numeric helpers that keep every derived figure finite.
//!
//! ## Public API
//!
//! - `MonthlyFinancialRecord` and its statement sections.
//! - `MonthKey`: a calendar month used for "N months ago" lookups.
//! - `FinancialSeries`: an owned, sanitized, date-ordered view of the input.
//! - `math`: safe division and growth helpers.

pub mod error;
pub mod math;
pub mod record;
pub mod series;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use record::{
    BalanceSheet, CostOfGoodsSold, IncomeStatement, MonthKey, MonthlyFinancialRecord,
    OperatingExpenses,
};
pub use series::FinancialSeries;

/// Number of months in a trailing-twelve-month window and in one seasonal cycle.
pub const MONTHS_PER_YEAR: usize = 12;
