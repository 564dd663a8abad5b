use serde::{Deserialize, Serialize};

use crate::{Metric, MetricRecord, Observation, TradingDate};

/// One flagged (day, metric) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyHit {
    pub date: TradingDate,
    pub metric: Metric,
    pub value: f64,
    /// Rounded score as stored on the record.
    pub z_score: Option<f64>,
}

/// Flatten flagged metrics into rows, in series order then metric order.
pub fn anomalies(records: &[MetricRecord]) -> Vec<AnomalyHit> {
    records
        .iter()
        .flat_map(|record| {
            record.anomalous_metrics().map(move |metric| AnomalyHit {
                date: record.date(),
                metric,
                value: record.observation.value(metric),
                z_score: record.z_score(metric),
            })
        })
        .collect()
}

/// Per-metric figures of a [`SeriesSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub latest: f64,
    /// Percentage change from the previous day.
    pub change_pct: Option<f64>,
    pub anomaly_count: usize,
}

/// Snapshot of the most recent day plus anomaly counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub days: usize,
    pub first_date: TradingDate,
    pub latest: Observation,
    pub metrics: Vec<MetricSummary>,
    /// Days with at least one flagged metric.
    pub anomalous_days: usize,
}

impl SeriesSummary {
    pub fn metric(&self, metric: Metric) -> Option<&MetricSummary> {
        self.metrics.iter().find(|summary| summary.metric == metric)
    }
}

/// `None` for an empty slice.
pub fn summarize(records: &[MetricRecord]) -> Option<SeriesSummary> {
    let first = records.first()?;
    let latest = records.last()?;
    let previous = records.len().checked_sub(2).map(|index| &records[index]);

    let metrics = Metric::ALL
        .into_iter()
        .map(|metric| MetricSummary {
            metric,
            latest: latest.observation.value(metric),
            change_pct: previous.and_then(|previous| {
                percent_change(
                    previous.observation.value(metric),
                    latest.observation.value(metric),
                )
            }),
            anomaly_count: records
                .iter()
                .filter(|record| record.is_anomaly(metric))
                .count(),
        })
        .collect();

    Some(SeriesSummary {
        days: records.len(),
        first_date: first.date(),
        latest: latest.observation.clone(),
        metrics,
        anomalous_days: records.iter().filter(|record| record.is_anomalous()).count(),
    })
}

fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}
