use serde::{Deserialize, Serialize};

use crate::{Metric, TradingDate, ValidationError};

/// One day of market data for an instrument.
///
/// Field names follow the analyzer's output schema. Provider-style names
/// (`price_usd`, `total_volume`) are accepted when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawObservation")]
pub struct Observation {
    date: TradingDate,
    price: f64,
    market_cap: f64,
    volume: f64,
}

impl Observation {
    pub fn new(
        date: TradingDate,
        price: f64,
        market_cap: f64,
        volume: f64,
    ) -> Result<Self, ValidationError> {
        validate_positive("price", price)?;
        validate_non_negative("market_cap", market_cap)?;
        validate_non_negative("volume", volume)?;

        Ok(Self {
            date,
            price,
            market_cap,
            volume,
        })
    }

    pub const fn date(&self) -> TradingDate {
        self.date
    }

    pub const fn price(&self) -> f64 {
        self.price
    }

    pub const fn market_cap(&self) -> f64 {
        self.market_cap
    }

    pub const fn volume(&self) -> f64 {
        self.volume
    }

    pub const fn value(&self, metric: Metric) -> f64 {
        metric.value_of(self)
    }
}

#[derive(Deserialize)]
struct RawObservation {
    date: TradingDate,
    #[serde(alias = "price_usd")]
    price: f64,
    market_cap: f64,
    #[serde(alias = "total_volume")]
    volume: f64,
}

impl TryFrom<RawObservation> for Observation {
    type Error = ValidationError;

    fn try_from(raw: RawObservation) -> Result<Self, Self::Error> {
        Self::new(raw.date, raw.price, raw.market_cap, raw.volume)
    }
}

fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(input: &str) -> TradingDate {
        TradingDate::parse(input).expect("valid date")
    }

    #[test]
    fn rejects_zero_price() {
        let err = Observation::new(day("2024-01-01"), 0.0, 10.0, 10.0).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonPositiveValue { field: "price" }
        ));
    }

    #[test]
    fn rejects_negative_volume() {
        let err =
            Observation::new(day("2024-01-01"), 1.0, 10.0, -5.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "volume" }));
    }

    #[test]
    fn rejects_non_finite_market_cap() {
        let err = Observation::new(day("2024-01-01"), 1.0, f64::NAN, 0.0).expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue {
                field: "market_cap"
            }
        ));
    }

    #[test]
    fn deserializes_provider_field_names() {
        let observation: Observation = serde_json::from_str(
            r#"{"date":"2024-05-01","price_usd":61000.5,"market_cap":1.2e12,"total_volume":3.4e10}"#,
        )
        .expect("provider names should be accepted");

        assert_eq!(observation.price(), 61000.5);
        assert_eq!(observation.value(Metric::Volume), 3.4e10);
    }

    #[test]
    fn accessors_expose_validated_values() {
        let observation =
            Observation::new(day("2024-01-02"), 42.5, 1.0e9, 0.0).expect("valid observation");

        assert_eq!(observation.date(), day("2024-01-02"));
        assert_eq!(observation.price(), 42.5);
        assert_eq!(observation.market_cap(), 1.0e9);
        assert_eq!(observation.volume(), 0.0);
        assert_eq!(observation.value(Metric::Price), observation.price());
    }

    #[test]
    fn deserialization_applies_validation() {
        let result: Result<Observation, _> = serde_json::from_str(
            r#"{"date":"2024-05-01","price":-1.0,"market_cap":1.0,"volume":1.0}"#,
        );
        assert!(result.is_err());
    }
}
