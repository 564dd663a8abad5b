use sigmascan_core::{anomalies, AnomalyAnalyzer, CoreError, FileSource, Metric};

use crate::cli::AnomaliesArgs;

use super::{calendar_warnings, CommandResult};

pub fn run(
    args: &AnomaliesArgs,
    analyzer: &AnomalyAnalyzer,
    source: &FileSource,
) -> Result<CommandResult, CoreError> {
    let series = analyzer.analyze_source(source)?;
    let only = args.metric.map(Metric::from);

    let hits: Vec<_> = anomalies(&series.records)
        .into_iter()
        .filter(|hit| only.is_none_or(|metric| hit.metric == metric))
        .collect();

    let data = serde_json::to_value(hits)?;
    Ok(CommandResult::ok(data).with_warnings(calendar_warnings(&series.calendar_issues)))
}
