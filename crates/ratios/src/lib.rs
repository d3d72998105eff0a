//! # FinHealth Ratio Engine
//!
//! Standard financial ratios for one month of a company's history.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate. It depends only on `core-types`
//!   and `configuration` (Layer 0).
//! - **Stateless Calculation:** `RatioEngine` holds nothing but its policy.
//!   It reads a `FinancialSeries` and a month position and returns plain data.
//! - **Always a Number:** A zero denominator or absent history gives `0.0`;
//!   no ratio is ever `NaN` or infinite.

pub mod engine;
pub mod report;

pub use engine::RatioEngine;
pub use report::{FinancialRatios, LtmSummary};
