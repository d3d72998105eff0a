//! # FinHealth Forecast Engine
//!
//! Twelve-month projections of revenue, costs and the balance sheet under
//! three scenarios (best case, most likely, worst case).
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Reads the raw monthly lines from `core-types` and takes
//!   its scenario multipliers from `configuration`. It never sees ratios or
//!   scores.
//! - **States as Types:** `HoltWinters::seed` either yields a `SeededModel` or
//!   nothing; only a seeded model can `project`.
//! - **Degrade, Don't Fail:** 24+ months smooth seasonally, 2 to 23 months
//!   extrapolate compound growth, anything shorter returns empty scenarios.

pub mod engine;
pub mod growth;
pub mod holt_winters;
pub mod result;

pub use engine::{FORECAST_HORIZON, ForecastEngine, MIN_FALLBACK_HISTORY};
pub use holt_winters::{HoltWinters, SeededModel, SmoothingParams};
pub use result::{ForecastMethod, ForecastPoint, ForecastResult, ForecastScenario, ScenarioKind};
