//! Wire batches and row normalization.
//!
//! A ChromeLogger batch is a compact, column-indexed table: an optional
//! `columns` header naming the fields, and one row per logging call.
//! Normalization zips each row against the effective column order and
//! produces [`CanonicalRecord`]s with every field defaulted. It never
//! fails; malformed input degrades to defaults field by field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column layout assumed when a batch carries none.
pub const DEFAULT_COLUMNS: [&str; 3] = ["log", "backtrace", "type"];

/// A decoded wire batch: optional column header plus rows.
///
/// `columns` stays loosely typed so a malformed header (wrong type,
/// non-string names) falls back to [`DEFAULT_COLUMNS`] instead of failing
/// the whole batch. Rows are equally loose: a non-array row normalizes to
/// an all-defaults record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Value>,
    #[serde(default)]
    pub rows: Vec<Value>,
}

impl RawBatch {
    /// A batch with the default column layout.
    pub fn from_rows(rows: Vec<Value>) -> Self {
        Self {
            columns: None,
            rows,
        }
    }
}

/// One logging call in canonical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    /// Positional arguments of the call. A bare scalar in the wire row is
    /// wrapped into a one-element sequence.
    pub log: Vec<Value>,
    /// Origin file and line, when the producer sent a truthy one.
    pub backtrace: Option<String>,
    /// Raw method name from the `type` column; validated downstream.
    pub method: String,
}

impl Default for CanonicalRecord {
    fn default() -> Self {
        Self {
            log: Vec::new(),
            backtrace: None,
            method: "log".to_string(),
        }
    }
}

/// Normalizes every row of a batch, preserving row order.
pub fn normalize(batch: &RawBatch) -> Vec<CanonicalRecord> {
    let columns = effective_columns(batch.columns.as_ref());
    batch
        .rows
        .iter()
        .map(|row| normalize_row(&columns, row))
        .collect()
}

/// Resolves the column order: explicit names lowercased, or the default
/// layout when the header is absent or not an array of strings.
fn effective_columns(columns: Option<&Value>) -> Vec<String> {
    if let Some(Value::Array(names)) = columns {
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            match name.as_str() {
                Some(s) => out.push(s.to_lowercase()),
                None => return DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            }
        }
        return out;
    }
    DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
}

fn normalize_row(columns: &[String], row: &Value) -> CanonicalRecord {
    let mut record = CanonicalRecord::default();
    let Value::Array(cells) = row else {
        return record;
    };
    for (name, cell) in columns.iter().zip(cells) {
        match name.as_str() {
            "log" => record.log = log_sequence(cell),
            "backtrace" => record.backtrace = truthy_text(cell),
            "type" => {
                if let Some(s) = cell.as_str() {
                    record.method = s.to_string();
                }
            }
            _ => {}
        }
    }
    record
}

fn log_sequence(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

/// Truthy coercion for the backtrace column: falsy values (empty string,
/// `false`, zero, `null`) carry no origin; compound values print as their
/// JSON text.
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) | Value::Null => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
