//! # FinHealth Trend Series
//!
//! Replays the ratio and score engines month by month over a company's full
//! history. A month is eligible once a full trailing year sits behind it, so
//! 13 months of input produce one point and 25 produce thirteen.

pub mod builder;
pub mod series;

pub use builder::{FIRST_ELIGIBLE_INDEX, TrendSeriesBuilder};
pub use series::{TrendPoint, TrendSeries};
