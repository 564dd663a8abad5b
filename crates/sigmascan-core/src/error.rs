use thiserror::Error;

use crate::SourceError;

/// Validation and contract errors exposed by `sigmascan-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("timestamp {value}ms is outside the supported calendar range")]
    TimestampOutOfRange { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be strictly positive")]
    NonPositiveValue { field: &'static str },

    #[error("invalid metric '{value}', expected one of price, market_cap, volume")]
    InvalidMetric { value: String },
    #[error("invalid input format '{value}', expected one of observations, market-chart")]
    InvalidSourceFormat { value: String },

    #[error("series '{field}' has {actual} samples, expected {expected}")]
    MisalignedSeries {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("samples at index {index} fall on different dates")]
    SampleDateMismatch { index: usize },

    #[error("configuration value {key}='{value}' is invalid")]
    InvalidConfigValue { key: &'static str, value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("source label cannot be empty")]
    EmptySourceLabel,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Reason an analysis request was rejected before any scoring happened.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("observation series is empty")]
    EmptySeries,
    #[error("threshold must be a positive finite number, got {value}")]
    NonPositiveThreshold { value: f64 },
    #[error("window size must be at least 1")]
    ZeroWindow,
}

/// Failure of the analyzer itself.
///
/// Undefined z-scores are not represented here; they are an ordinary
/// per-day outcome carried by [`crate::MetricScore`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyzeError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
