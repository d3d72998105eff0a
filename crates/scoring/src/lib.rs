//! # FinHealth Score Engine
//!
//! The rule-based financial health score: a Profitability Score built from
//! revenue growth in three stages, an Asset Development Score built from the
//! current-asset cover, and their mean, the Financial Score.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Depends only on `core-types`. It reads growth rates
//!   off the series directly and does not go through the ratio engine.
//! - **Tables, Not Branches:** Every tier is an ordered `(threshold, outcome)`
//!   table (`tiers` module). The latest-month summary and the trend series use
//!   the same tables.
//! - **Degrade, Don't Fail:** Short history scores as zero growth.

pub mod engine;
pub mod growth;
pub mod summary;
pub mod tiers;

pub use engine::{SCORE_CEILING, SCORE_FLOOR, ScoreEngine, ScoreTables};
pub use growth::GrowthInputs;
pub use summary::{HealthRating, ScoreSummary};
pub use tiers::{Adjustment, Threshold, Tier, TierTable};
