//! # FinHealth Analytics
//!
//! The single entry point from raw monthly records to everything the
//! dashboard shows: latest ratios, the score summary, the trend series and
//! the three-scenario forecast.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Orchestration:** Normalizes the input once into a
//!   `FinancialSeries` and hands it to each Layer 1 engine.
//! - **Stateless Calculation:** The `AnalyticsEngine` holds configuration
//!   only. Memoization belongs to callers, keyed on `SeriesFingerprint`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Runs the pipeline.
//! - `DerivedBundle`: The standardized struct that holds every derived result.
//! - `SeriesFingerprint`: A content hash of the input records.

pub mod engine;
pub mod fingerprint;
pub mod report;

pub use engine::AnalyticsEngine;
pub use fingerprint::SeriesFingerprint;
pub use report::DerivedBundle;
