use sigmascan_core::{summarize, AnomalyAnalyzer, CoreError, FileSource};

use super::{calendar_warnings, CommandResult};

pub fn run(analyzer: &AnomalyAnalyzer, source: &FileSource) -> Result<CommandResult, CoreError> {
    let series = analyzer.analyze_source(source)?;
    // analyze_source rejects empty series, so a summary always exists here.
    let data = serde_json::to_value(summarize(&series.records))?;
    Ok(CommandResult::ok(data).with_warnings(calendar_warnings(&series.calendar_issues)))
}
