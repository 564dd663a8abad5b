use std::env;

use serde::{Deserialize, Serialize};

use crate::{AnalyzeError, InputError, ValidationError};

pub const DEFAULT_THRESHOLD: f64 = 1.5;
pub const DEFAULT_WINDOW_SIZE: usize = 7;

pub const THRESHOLD_ENV: &str = "SIGMASCAN_THRESHOLD";
pub const WINDOW_SIZE_ENV: &str = "SIGMASCAN_WINDOW_SIZE";

/// Parameters of the rolling z-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// A day is flagged when `|z| > threshold`.
    pub threshold: f64,
    /// Trailing window length, current day included.
    pub window_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl AnalyzerConfig {
    pub fn new(threshold: f64, window_size: usize) -> Result<Self, AnalyzeError> {
        let config = Self {
            threshold,
            window_size,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalyzeError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(InputError::NonPositiveThreshold {
                value: self.threshold,
            }
            .into());
        }
        if self.window_size == 0 {
            return Err(InputError::ZeroWindow.into());
        }
        Ok(())
    }

    /// Defaults overlaid with `SIGMASCAN_THRESHOLD` and `SIGMASCAN_WINDOW_SIZE`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(THRESHOLD_ENV) {
            config.threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value > 0.0)
                .ok_or(ValidationError::InvalidConfigValue {
                    key: THRESHOLD_ENV,
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup(WINDOW_SIZE_ENV) {
            config.window_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ValidationError::InvalidConfigValue {
                    key: WINDOW_SIZE_ENV,
                    value: raw.clone(),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_seven_day_window() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.window_size, 7);
        assert_eq!(config.threshold, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_threshold() {
        let err = AnalyzerConfig::new(f64::INFINITY, 7).expect_err("must fail");
        assert!(matches!(
            err,
            AnalyzeError::InvalidInput(InputError::NonPositiveThreshold { .. })
        ));
    }

    #[test]
    fn overlays_environment_values() {
        let config = AnalyzerConfig::from_lookup(|key| match key {
            THRESHOLD_ENV => Some(String::from("2.5")),
            WINDOW_SIZE_ENV => Some(String::from(" 14 ")),
            _ => None,
        })
        .expect("valid overrides");

        assert_eq!(config.threshold, 2.5);
        assert_eq!(config.window_size, 14);
    }

    #[test]
    fn rejects_zero_window_from_environment() {
        let err = AnalyzerConfig::from_lookup(|key| {
            (key == WINDOW_SIZE_ENV).then(|| String::from("0"))
        })
        .expect_err("must fail");

        assert!(matches!(
            err,
            ValidationError::InvalidConfigValue {
                key: WINDOW_SIZE_ENV,
                ..
            }
        ));
    }
}
