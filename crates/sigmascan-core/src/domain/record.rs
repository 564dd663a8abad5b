use serde::{Deserialize, Serialize};

use crate::{Metric, Observation, TradingDate, ValidationError};

/// Rolling score of a single metric on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricScore {
    /// Rounded to two decimals; `None` when the trailing window had no variance.
    pub z_score: Option<f64>,
    pub anomaly: bool,
}

impl MetricScore {
    pub const UNDEFINED: Self = Self {
        z_score: None,
        anomaly: false,
    };
}

/// Observation enriched with one [`MetricScore`] per [`Metric`].
///
/// Serialized flat: the observation fields followed by `z_score_<metric>`
/// and `anomaly_<metric>` for each metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "MetricRecordRow", try_from = "MetricRecordRow")]
pub struct MetricRecord {
    pub observation: Observation,
    scores: [MetricScore; 3],
}

impl MetricRecord {
    pub fn new(observation: Observation, scores: [MetricScore; 3]) -> Self {
        Self {
            observation,
            scores,
        }
    }

    pub fn date(&self) -> TradingDate {
        self.observation.date()
    }

    pub fn score(&self, metric: Metric) -> MetricScore {
        self.scores[metric.index()]
    }

    pub fn z_score(&self, metric: Metric) -> Option<f64> {
        self.score(metric).z_score
    }

    pub fn is_anomaly(&self, metric: Metric) -> bool {
        self.score(metric).anomaly
    }

    /// True when any metric is flagged on this day.
    pub fn is_anomalous(&self) -> bool {
        self.scores.iter().any(|score| score.anomaly)
    }

    pub fn anomalous_metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL
            .into_iter()
            .filter(move |metric| self.is_anomaly(*metric))
    }
}

#[derive(Serialize, Deserialize)]
struct MetricRecordRow {
    date: TradingDate,
    price: f64,
    market_cap: f64,
    volume: f64,
    z_score_price: Option<f64>,
    z_score_market_cap: Option<f64>,
    z_score_volume: Option<f64>,
    anomaly_price: bool,
    anomaly_market_cap: bool,
    anomaly_volume: bool,
}

impl From<MetricRecord> for MetricRecordRow {
    fn from(record: MetricRecord) -> Self {
        let [price, market_cap, volume] = record.scores;
        let observation = record.observation;
        Self {
            date: observation.date(),
            price: observation.price(),
            market_cap: observation.market_cap(),
            volume: observation.volume(),
            z_score_price: price.z_score,
            z_score_market_cap: market_cap.z_score,
            z_score_volume: volume.z_score,
            anomaly_price: price.anomaly,
            anomaly_market_cap: market_cap.anomaly,
            anomaly_volume: volume.anomaly,
        }
    }
}

impl TryFrom<MetricRecordRow> for MetricRecord {
    type Error = ValidationError;

    fn try_from(row: MetricRecordRow) -> Result<Self, Self::Error> {
        let observation = Observation::new(row.date, row.price, row.market_cap, row.volume)?;
        Ok(Self::new(
            observation,
            [
                MetricScore {
                    z_score: row.z_score_price,
                    anomaly: row.anomaly_price,
                },
                MetricScore {
                    z_score: row.z_score_market_cap,
                    anomaly: row.anomaly_market_cap,
                },
                MetricScore {
                    z_score: row.z_score_volume,
                    anomaly: row.anomaly_volume,
                },
            ],
        ))
    }
}
