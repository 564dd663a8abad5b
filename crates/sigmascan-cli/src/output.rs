use std::io::{self, Write};

use serde_json::{json, Value};
use sigmascan_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Ndjson => write_ndjson(&mut out, envelope)?,
        OutputFormat::Table => write_table(&mut out, envelope)?,
    }

    Ok(())
}

fn write_ndjson<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "{}", serde_json::to_string(&json!({ "meta": envelope.meta }))?)?;

    match &envelope.data {
        Value::Array(rows) => {
            for row in rows {
                writeln!(out, "{}", serde_json::to_string(row)?)?;
            }
        }
        Value::Null => {}
        other => writeln!(out, "{}", serde_json::to_string(other)?)?,
    }

    for error in &envelope.errors {
        writeln!(out, "{}", serde_json::to_string(&json!({ "error": error }))?)?;
    }

    Ok(())
}

fn write_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "source      : {}", envelope.meta.source)?;
    writeln!(
        out,
        "parameters  : threshold={} window={}",
        envelope.meta.threshold, envelope.meta.window_size
    )?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    match &envelope.data {
        Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
            for line in table_lines(rows) {
                writeln!(out, "{line}")?;
            }
        }
        Value::Array(rows) if rows.is_empty() => writeln!(out, "(no rows)")?,
        Value::Null => {}
        other => {
            for line in serde_json::to_string_pretty(other)?.lines() {
                writeln!(out, "  {line}")?;
            }
        }
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

/// Header plus one line per row, columns taken from the first row's keys.
fn table_lines(rows: &[Value]) -> Vec<String> {
    let columns: Vec<&str> = rows
        .first()
        .and_then(Value::as_object)
        .map(|first| first.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| cell(&row[*column])).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].len())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |values: Vec<&str>| {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_owned()
    };

    std::iter::once(format_row(columns.clone()))
        .chain(
            cells
                .iter()
                .map(|row| format_row(row.iter().map(String::as_str).collect())),
        )
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns_and_marks_nulls() {
        let rows = vec![
            json!({"date": "2024-01-01", "z_score_price": null}),
            json!({"date": "2024-01-02", "z_score_price": -2.45}),
        ];

        let lines = table_lines(&rows);
        assert_eq!(
            lines,
            vec![
                "date        z_score_price",
                "2024-01-01  -",
                "2024-01-02  -2.45",
            ]
        );
    }
}
