//! # Sigmascan Core
//!
//! Rolling z-score anomaly detection for daily market series.
//!
//! ## Overview
//!
//! A series of daily [`Observation`]s (price, market cap, volume) goes in;
//! a [`MetricRecord`] per day comes out, carrying for each [`Metric`] the
//! trailing-window z-score and whether its magnitude exceeds the configured
//! threshold.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analyzer`] | Rolling z-score scoring |
//! | [`calendar`] | Gap, duplicate and ordering diagnostics |
//! | [`config`] | Threshold and window configuration |
//! | [`data_source`] | Observation sources (file, memory) |
//! | [`domain`] | Observation, metric and record types |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`market_chart`] | Provider market-chart payload mapping |
//! | [`summary`] | Anomaly listing and latest-day summary |
//!
//! ## Quick Start
//!
//! ```rust
//! use sigmascan_core::{analyze, Metric, Observation, TradingDate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let prices = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 130.0];
//! let observations = prices
//!     .iter()
//!     .enumerate()
//!     .map(|(day, price)| {
//!         let date = TradingDate::parse(&format!("2024-01-{:02}", day + 1))?;
//!         Observation::new(date, *price, 1.0e9, 5.0e6)
//!     })
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let records = analyze(&observations, 1.5, 7)?;
//! assert_eq!(records[7].z_score(Metric::Price), Some(2.45));
//! assert!(records[7].is_anomaly(Metric::Price));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! [`AnalyzeError::InvalidInput`] is returned for an empty series, a
//! non-positive threshold or a zero window, before any scoring. A day whose
//! window has no variance is not an error: its score is `None` and it is
//! never flagged. Problems obtaining observations are reported as
//! [`SourceError`].

pub mod analyzer;
pub mod calendar;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod market_chart;
pub mod summary;

pub use analyzer::{analyze, AnalyzedSeries, AnomalyAnalyzer};
pub use calendar::{inspect_calendar, CalendarIssue};
pub use config::{AnalyzerConfig, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};
pub use data_source::{
    parse_payload, FileSource, MemorySource, ObservationSource, SourceError, SourceErrorKind,
    SourceFormat,
};
pub use domain::{Metric, MetricRecord, MetricScore, Observation, TradingDate};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{AnalyzeError, CoreError, InputError, ValidationError};
pub use market_chart::{ChartSample, MarketChart};
pub use summary::{anomalies, summarize, AnomalyHit, MetricSummary, SeriesSummary};
