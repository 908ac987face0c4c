//! CSV export for list views and reports.
//!
//! Rows are any uniform flat `Serialize` records. The header comes
//! from the first record's field order; every record contributes one
//! line. Quoting follows RFC 4180: a field is quoted when it contains
//! a comma, a quote, or a line break, and embedded quotes are doubled.
//! An empty input produces nothing at all -- no header, no file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Render rows to CSV text. `None` for an empty input.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<Option<String>, CoreError> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };

    let headers = field_names(first)?;
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in rows {
        let map = as_object(row)?;
        let cells: Vec<String> = headers
            .iter()
            .map(|h| escape(&cell_text(map.get(h.as_str()))))
            .collect();
        lines.push(cells.join(","));
    }

    Ok(Some(lines.join("\n")))
}

/// Write rows to `<label>.csv` under `dir`. Returns the written path,
/// or `None` when there was nothing to export.
pub fn write_csv<T: Serialize>(
    rows: &[T],
    label: &str,
    dir: &Path,
) -> Result<Option<PathBuf>, CoreError> {
    let Some(csv) = to_csv(rows)? else {
        return Ok(None);
    };
    let path = dir.join(format!("{label}.csv"));
    std::fs::write(&path, csv).map_err(|source| CoreError::ExportWrite {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(path))
}

fn field_names<T: Serialize>(row: &T) -> Result<Vec<String>, CoreError> {
    Ok(as_object(row)?.keys().cloned().collect())
}

fn as_object<T: Serialize>(row: &T) -> Result<serde_json::Map<String, Value>, CoreError> {
    match serde_json::to_value(row).map_err(CoreError::ExportSerialize)? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::ExportSerialize(serde::ser::Error::custom(
            format!("expected a flat record, got {other}"),
        ))),
    }
}

/// Flatten one field value to cell text. Missing and null fields are
/// empty cells; nested values fall back to compact JSON.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
