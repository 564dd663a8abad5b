//! # Domain Models
//!
//! Input and output types of the anomaly pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observation`] | One day of price, market cap and volume |
//! | [`Metric`] | The three tracked series |
//! | [`MetricScore`] | Rounded z-score and anomaly flag for one metric |
//! | [`MetricRecord`] | Observation plus a score per metric |
//! | [`TradingDate`] | Calendar day (`YYYY-MM-DD`) |
//!
//! Constructors validate their inputs, and deserialization runs through the
//! same checks, so a value of these types is always in range.

mod date;
mod metric;
mod observation;
mod record;

pub use date::TradingDate;
pub use metric::Metric;
pub use observation::Observation;
pub use record::{MetricRecord, MetricScore};
