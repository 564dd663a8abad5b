mod analyze;
mod anomalies;
mod calendar;
mod summary;

use serde_json::Value;
use sigmascan_core::{
    AnalyzerConfig, AnomalyAnalyzer, CoreError, Envelope, EnvelopeError, EnvelopeMeta,
    FileSource, ObservationSource,
};
use tracing::warn;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    fn failed(error: &CoreError) -> Result<Self, CliError> {
        let envelope_error = EnvelopeError::new(error_code(error), error.to_string())?;
        Ok(Self {
            data: Value::Null,
            warnings: Vec::new(),
            errors: vec![envelope_error],
        })
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let config = resolve_config(cli)?;
    let analyzer = AnomalyAnalyzer::new(config)?;
    let source = FileSource::new(cli.command.input().path.clone(), cli.input_format.into());

    let outcome = match &cli.command {
        Command::Analyze(_) => analyze::run(&analyzer, &source),
        Command::Anomalies(args) => anomalies::run(args, &analyzer, &source),
        Command::Summary(_) => summary::run(&analyzer, &source),
        Command::Calendar(_) => calendar::run(&source),
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = match outcome {
        Ok(result) => result,
        Err(error) => {
            warn!(code = error_code(&error), "command failed: {error}");
            CommandResult::failed(&error)?
        }
    };

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        source.label(),
        analyzer.config(),
    )?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    let mut envelope = Envelope::success(meta, data);
    for error in errors {
        envelope.push_error(error)?;
    }
    Ok(envelope)
}

/// Process exit code for a rendered envelope.
///
/// Envelope errors map by code family: `source.*` exits 3, `analyze.*` and
/// `validation.*` exit 2, anything else exits 4. In strict mode any warning
/// or error is a [`CliError::StrictModeViolation`].
pub fn exit_code(envelope: &Envelope<Value>, strict: bool) -> Result<u8, CliError> {
    if strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    Ok(envelope
        .errors
        .first()
        .map_or(0, |error| match error.code.split('.').next() {
            Some("source") => 3,
            Some("analyze" | "validation") => 2,
            _ => 4,
        }))
}

/// Environment values overlaid by explicit flags.
fn resolve_config(cli: &Cli) -> Result<AnalyzerConfig, CliError> {
    let mut config = AnalyzerConfig::from_env()?;
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(window) = cli.window {
        config.window_size = window;
    }
    Ok(config)
}

fn error_code(error: &CoreError) -> &'static str {
    match error {
        CoreError::Validation(_) => "validation.invalid",
        CoreError::Analyze(_) => "analyze.invalid_input",
        CoreError::Source(source) => source.code(),
        CoreError::Serialization(_) => "internal.serialization",
    }
}

/// Renders calendar issues as envelope warnings.
fn calendar_warnings<'a, I>(issues: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a sigmascan_core::CalendarIssue>,
{
    issues
        .into_iter()
        .map(|issue| format!("calendar: {issue}"))
        .collect()
}
