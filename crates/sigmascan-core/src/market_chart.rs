use serde::{Deserialize, Serialize};

use crate::{Observation, TradingDate, ValidationError};

/// `[unix_millis, value]` sample as published by the market-chart endpoint.
pub type ChartSample = (f64, f64);

/// Market-chart payload: three parallel, timestamp-aligned series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<ChartSample>,
    pub market_caps: Vec<ChartSample>,
    pub total_volumes: Vec<ChartSample>,
}

impl MarketChart {
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Pair the series by position into observations.
    ///
    /// The price sample's timestamp dates the observation. All three series
    /// must have the same length and every index must fall on one UTC day.
    pub fn into_observations(self) -> Result<Vec<Observation>, ValidationError> {
        let expected = self.prices.len();
        check_length("market_caps", expected, self.market_caps.len())?;
        check_length("total_volumes", expected, self.total_volumes.len())?;

        self.prices
            .iter()
            .zip(&self.market_caps)
            .zip(&self.total_volumes)
            .enumerate()
            .map(|(index, ((price, market_cap), volume))| {
                let date = sample_date(price.0)?;
                if sample_date(market_cap.0)? != date || sample_date(volume.0)? != date {
                    return Err(ValidationError::SampleDateMismatch { index });
                }
                Observation::new(date, price.1, market_cap.1, volume.1)
            })
            .collect()
    }
}

fn check_length(field: &'static str, expected: usize, actual: usize) -> Result<(), ValidationError> {
    if expected != actual {
        return Err(ValidationError::MisalignedSeries {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn sample_date(timestamp_ms: f64) -> Result<TradingDate, ValidationError> {
    if !timestamp_ms.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "timestamp" });
    }
    TradingDate::from_unix_millis(timestamp_ms.floor() as i64)
}
