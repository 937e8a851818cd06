// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flat `Campo,Valor` export of a stored case.

use crate::error::ApiError;
use intake_domain::{Record, Value};
use intake_persistence::CaseListEntry;

/// Flattens `record` into `(dotted path, value)` rows in key order.
///
/// Sets are rendered as JSON arrays.
///
/// # Errors
///
/// Returns `ApiError::Internal` if a set cannot be rendered.
pub fn flatten_record(record: &Record) -> Result<Vec<(String, String)>, ApiError> {
    let mut rows: Vec<(String, String)> = Vec::new();
    flatten_into(record, "", &mut rows)?;
    Ok(rows)
}

fn flatten_into(
    record: &Record,
    prefix: &str,
    rows: &mut Vec<(String, String)>,
) -> Result<(), ApiError> {
    for (key, value) in record.iter() {
        let full: String = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Text(text) => rows.push((full, text.to_string())),
            Value::Set(set) => {
                let items: Vec<&str> = set.iter().collect();
                let json: String =
                    serde_json::to_string(&items).map_err(|err| ApiError::Internal {
                        message: format!("Failed to render '{full}': {err}"),
                    })?;
                rows.push((full, json));
            }
            Value::Record(inner) => flatten_into(inner, &full, rows)?,
        }
    }
    Ok(())
}

/// Renders a stored case as CSV with a `Campo,Valor` header, starting with
/// its id.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV cannot be written.
pub fn case_to_csv(entry: &CaseListEntry) -> Result<String, ApiError> {
    let to_internal = |err: csv::Error| ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Campo", "Valor"]).map_err(to_internal)?;
    writer
        .write_record(["id", entry.id.to_string().as_str()])
        .map_err(to_internal)?;
    for (field, value) in flatten_record(entry.record.root())? {
        writer.write_record([&field, &value]).map_err(to_internal)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|err| ApiError::Internal {
        message: format!("Failed to finish CSV: {err}"),
    })?;
    String::from_utf8(bytes).map_err(|err| ApiError::Internal {
        message: format!("CSV is not UTF-8: {err}"),
    })
}
