//! Rolling z-score anomaly detection.
//!
//! For every day `i` and every [`Metric`], the analyzer looks at the trailing
//! window `observations[max(0, i + 1 - window_size) ..= i]`, computes the
//! mean and the population standard deviation of that metric, and scores the
//! day as `(x_i - mean) / std_dev`.
//!
//! - Near the start of a series the window is simply shorter; it is never
//!   padded.
//! - A window without variance (always the case at index 0) leaves the score
//!   undefined and the day unflagged.
//! - The stored score is rounded to two decimals, half away from zero. The
//!   anomaly flag compares the unrounded score against the threshold, so a
//!   value like `1.504` with threshold `1.5` is flagged even though it is
//!   reported as `1.5`.
//!
//! The window is positional. Missing calendar days are not detected here;
//! see [`crate::calendar`] for that.

use tracing::debug;

use crate::{
    inspect_calendar, AnalyzeError, AnalyzerConfig, CalendarIssue, CoreError, InputError, Metric,
    MetricRecord, MetricScore, Observation, ObservationSource,
};

/// Scored series together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedSeries {
    pub source: String,
    pub records: Vec<MetricRecord>,
    pub calendar_issues: Vec<CalendarIssue>,
}

/// Stateless batch scorer parameterized by an [`AnalyzerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnomalyAnalyzer {
    config: AnalyzerConfig,
}

impl AnomalyAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> AnalyzerConfig {
        self.config
    }

    /// Score every observation, preserving length and order.
    pub fn analyze(&self, observations: &[Observation]) -> Result<Vec<MetricRecord>, AnalyzeError> {
        self.config.validate()?;
        if observations.is_empty() {
            return Err(InputError::EmptySeries.into());
        }

        debug!(
            observations = observations.len(),
            threshold = self.config.threshold,
            window_size = self.config.window_size,
            "scoring series"
        );

        let records: Vec<MetricRecord> = (0..observations.len())
            .map(|index| self.score_day(observations, index))
            .collect();

        debug!(
            anomalous_days = records.iter().filter(|record| record.is_anomalous()).count(),
            "scoring complete"
        );

        Ok(records)
    }

    /// Load a series from `source`, inspect its calendar and score it.
    pub fn analyze_source<S>(&self, source: &S) -> Result<AnalyzedSeries, CoreError>
    where
        S: ObservationSource + ?Sized,
    {
        let observations = source.load()?;
        let calendar_issues = inspect_calendar(&observations);
        let records = self.analyze(&observations)?;

        Ok(AnalyzedSeries {
            source: source.label(),
            records,
            calendar_issues,
        })
    }

    fn score_day(&self, observations: &[Observation], index: usize) -> MetricRecord {
        let start = (index + 1).saturating_sub(self.config.window_size);
        let window = &observations[start..=index];
        let current = &observations[index];

        let scores = Metric::ALL.map(|metric| {
            let values: Vec<f64> = window.iter().map(|day| day.value(metric)).collect();
            match z_score(&values, current.value(metric)) {
                Some(raw) => MetricScore {
                    z_score: Some(round_to_hundredths(raw)),
                    anomaly: raw.abs() > self.config.threshold,
                },
                None => MetricScore::UNDEFINED,
            }
        });

        MetricRecord::new(current.clone(), scores)
    }
}

/// Convenience wrapper over [`AnomalyAnalyzer::analyze`].
pub fn analyze(
    observations: &[Observation],
    threshold: f64,
    window_size: usize,
) -> Result<Vec<MetricRecord>, AnalyzeError> {
    AnomalyAnalyzer::new(AnalyzerConfig {
        threshold,
        window_size,
    })?
    .analyze(observations)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Unrounded score of `current` against `window`, `None` without variance.
///
/// A flat window is detected on the values themselves: the float mean of
/// identical non-integral values can drift from them, leaving a residual
/// deviation around `1e-17` that would otherwise score as `±1.0`.
fn z_score(window: &[f64], current: f64) -> Option<f64> {
    let first = *window.first()?;
    if window.iter().all(|value| *value == first) {
        return None;
    }

    let avg = mean(window);
    let dev = population_std_dev(window, avg);
    if dev == 0.0 {
        return None;
    }
    Some((current - avg) / dev)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
