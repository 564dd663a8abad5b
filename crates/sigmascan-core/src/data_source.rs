use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{MarketChart, Observation, ValidationError};

/// On-disk layout understood by [`FileSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// JSON array of observations.
    Observations,
    /// Provider market-chart payload, see [`MarketChart`].
    MarketChart,
}

impl SourceFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Observations => "observations",
            Self::MarketChart => "market-chart",
        }
    }
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "observations" => Ok(Self::Observations),
            "market-chart" => Ok(Self::MarketChart),
            other => Err(ValidationError::InvalidSourceFormat {
                value: other.to_owned(),
            }),
        }
    }
}

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    InvalidPayload,
}

/// Failure to produce observations, kept distinct from analyzer errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidPayload,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::InvalidPayload => "source.invalid_payload",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Anything that can hand the analyzer an ordered observation series.
pub trait ObservationSource {
    /// Human-readable origin, reported in envelope metadata.
    fn label(&self) -> String;
    fn load(&self) -> Result<Vec<Observation>, SourceError>;
}

/// Fixed in-memory series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemorySource {
    label: String,
    observations: Vec<Observation>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            label: label.into(),
            observations,
        }
    }
}

impl ObservationSource for MemorySource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn load(&self) -> Result<Vec<Observation>, SourceError> {
        Ok(self.observations.clone())
    }
}

/// JSON file in one of the [`SourceFormat`] layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
    format: SourceFormat,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

impl ObservationSource for FileSource {
    fn label(&self) -> String {
        format!("{}:{}", self.format, self.path.display())
    }

    fn load(&self) -> Result<Vec<Observation>, SourceError> {
        let payload = fs::read_to_string(&self.path).map_err(|error| {
            SourceError::unavailable(format!(
                "failed to read '{}': {error}",
                self.path.display()
            ))
        })?;

        let observations = parse_payload(&payload, self.format)?;
        info!(
            path = %self.path.display(),
            format = %self.format,
            observations = observations.len(),
            "loaded series"
        );
        Ok(observations)
    }
}

/// Decode a payload already held in memory.
pub fn parse_payload(payload: &str, format: SourceFormat) -> Result<Vec<Observation>, SourceError> {
    match format {
        SourceFormat::Observations => serde_json::from_str::<Vec<Observation>>(payload)
            .map_err(|error| SourceError::invalid_payload(format!("observations: {error}"))),
        SourceFormat::MarketChart => MarketChart::from_json(payload)
            .map_err(|error| SourceError::invalid_payload(format!("market chart: {error}")))?
            .into_observations()
            .map_err(|error| SourceError::invalid_payload(format!("market chart: {error}"))),
    }
}
