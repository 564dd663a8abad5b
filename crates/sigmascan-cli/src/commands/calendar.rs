use sigmascan_core::{inspect_calendar, CoreError, FileSource, ObservationSource};

use super::CommandResult;

pub fn run(source: &FileSource) -> Result<CommandResult, CoreError> {
    let observations = source.load()?;
    let issues = inspect_calendar(&observations);
    Ok(CommandResult::ok(serde_json::to_value(issues)?))
}
