use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Observation, ValidationError};

/// Tracked series of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Price,
    MarketCap,
    Volume,
}

impl Metric {
    /// Every metric, in the order scores are stored and reported.
    pub const ALL: [Self; 3] = [Self::Price, Self::MarketCap, Self::Volume];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::MarketCap => "market_cap",
            Self::Volume => "volume",
        }
    }

    /// Slot of this metric in per-record score arrays.
    pub const fn index(self) -> usize {
        match self {
            Self::Price => 0,
            Self::MarketCap => 1,
            Self::Volume => 2,
        }
    }

    pub const fn value_of(self, observation: &Observation) -> f64 {
        match self {
            Self::Price => observation.price(),
            Self::MarketCap => observation.market_cap(),
            Self::Volume => observation.volume(),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "price" => Ok(Self::Price),
            "market_cap" => Ok(Self::MarketCap),
            "volume" => Ok(Self::Volume),
            other => Err(ValidationError::InvalidMetric {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metric_names() {
        assert_eq!(Metric::from_str("market-cap").expect("must parse"), Metric::MarketCap);
        assert_eq!(Metric::from_str(" Volume ").expect("must parse"), Metric::Volume);
    }

    #[test]
    fn rejects_unknown_metric() {
        let err = Metric::from_str("open_interest").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidMetric { .. }));
    }

    #[test]
    fn indexes_follow_declaration_order() {
        for (position, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), position);
        }
    }
}
