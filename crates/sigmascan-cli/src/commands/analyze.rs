use sigmascan_core::{AnomalyAnalyzer, CoreError, FileSource};

use super::{calendar_warnings, CommandResult};

pub fn run(analyzer: &AnomalyAnalyzer, source: &FileSource) -> Result<CommandResult, CoreError> {
    let series = analyzer.analyze_source(source)?;
    let data = serde_json::to_value(&series.records)?;
    Ok(CommandResult::ok(data).with_warnings(calendar_warnings(&series.calendar_issues)))
}
