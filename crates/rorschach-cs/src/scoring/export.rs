//! Flat `section,field,value` export of a structural summary.

use super::summary::StructuralSummary;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Csv(err) => write!(f, "failed to write summary CSV: {}", err),
            ExportError::Io(err) => write!(f, "failed to flush summary export: {}", err),
            ExportError::Encode(err) => write!(f, "failed to encode summary: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Csv(err) => Some(err),
            ExportError::Io(err) => Some(err),
            ExportError::Encode(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub section: String,
    pub field: String,
    pub value: String,
}

/// Flattens every public field, keeping the serialised field names.
///
/// Nested keys are joined with `.`; per-response rows are keyed by their
/// 1-based response number. Lists of plain values are joined with `; `.
pub fn summary_rows(summary: &StructuralSummary) -> Result<Vec<SummaryRow>, ExportError> {
    let mut rows = Vec::new();
    if let Value::Object(sections) = serde_json::to_value(summary)? {
        for (section, value) in &sections {
            flatten(section, None, value, &mut rows);
        }
    }
    Ok(rows)
}

fn flatten(section: &str, prefix: Option<String>, value: &Value, rows: &mut Vec<SummaryRow>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                flatten(section, Some(join(&prefix, key)), nested, rows);
            }
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            for (idx, item) in items.iter().enumerate() {
                flatten(section, Some(join(&prefix, &(idx + 1).to_string())), item, rows);
            }
        }
        Value::Array(items) => rows.push(SummaryRow {
            section: section.to_string(),
            field: prefix.unwrap_or_default(),
            value: items.iter().map(scalar).collect::<Vec<_>>().join("; "),
        }),
        scalar_value => rows.push(SummaryRow {
            section: section.to_string(),
            field: prefix.unwrap_or_default(),
            value: scalar(scalar_value),
        }),
    }
}

fn join(prefix: &Option<String>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key.to_string(),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn write_csv<W: Write>(rows: &[SummaryRow], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{calculate, sample::sample_data};

    fn sample_rows() -> Vec<SummaryRow> {
        let summary = calculate(&sample_data())
            .into_result()
            .expect("sample protocol is valid");
        summary_rows(&summary).expect("flattens")
    }

    fn find<'a>(rows: &'a [SummaryRow], section: &str, field: &str) -> Option<&'a SummaryRow> {
        rows.iter()
            .find(|row| row.section == section && row.field == field)
    }

    #[test]
    fn keeps_published_field_names() {
        let rows = sample_rows();
        assert_eq!(
            find(&rows, "upper_section", "Zf").map(|row| row.value.as_str()),
            Some("12")
        );
        assert_eq!(
            find(&rows, "lower_section", "R").map(|row| row.value.as_str()),
            Some("15")
        );
        assert!(find(&rows, "lower_section", "EBPer").is_some());
        assert!(find(&rows, "special_indices", "PTI").is_some());
        assert!(find(&rows, "special_indices", "OBS_rules.r4").is_some());
        assert!(find(&rows, "lower_section", "affect.FC:CF+C").is_some());
    }

    #[test]
    fn rows_are_keyed_by_response_number() {
        let rows = sample_rows();
        assert_eq!(
            find(&rows, "row_calculations", "15.card").map(|row| row.value.as_str()),
            Some("X")
        );
        assert_eq!(
            find(&rows, "row_calculations", "1.blend").map(|row| row.value.as_str()),
            Some("")
        );
    }

    #[test]
    fn writes_header_and_rows() {
        let rows = vec![SummaryRow {
            section: "lower_section".into(),
            field: "FC:CF+C".into(),
            value: "2:3".into(),
        }];
        let mut buffer = Vec::new();
        write_csv(&rows, &mut buffer).expect("writes");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "section,field,value\nlower_section,FC:CF+C,2:3\n");
    }
}
