//! Tabular rendering for structured `table` payloads.
//!
//! Array payloads discover their columns from the rows: array rows
//! contribute index columns, object rows their keys, scalar rows a
//! synthetic `Values` column. Plain objects render as a two-column
//! key/value listing.

use logpane_markup::encode;
use logpane_protocol::RenderValue;
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Renders a structured value as table markup. The optional mask is the
/// caller's second argument: an array of column names to keep.
pub(crate) fn render(data: &Value, mask: Option<&[Value]>) -> String {
    match data {
        Value::Array(rows) => array_table(rows, mask),
        Value::Object(map) => object_table(map, mask),
        _ => String::new(),
    }
}

fn array_table(rows: &[Value], mask: Option<&[Value]>) -> String {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        match row {
            Value::Array(items) => {
                for index in 0..items.len() {
                    push_unique(&mut columns, index.to_string());
                }
            }
            Value::Object(map) => {
                for key in map.keys() {
                    push_unique(&mut columns, key.clone());
                }
            }
            _ => push_unique(&mut columns, "Values".to_string()),
        }
    }

    if let Some(mask) = mask {
        let keep: Vec<String> = mask.iter().filter_map(column_name).collect();
        // the scalar column survives masking
        columns.retain(|column| column == "Values" || keep.contains(column));
    }

    columns.sort_by(|a, b| match (a == "Values", b == "Values") {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.cmp(a),
    });

    let mut html = String::from("<table><thead><tr><th>(index)</th>");
    for column in &columns {
        html.push_str("<th>");
        html.push_str(column);
        html.push_str("</th>");
    }
    html.push_str("</tr></thead><tbody>");

    for (index, row) in rows.iter().enumerate() {
        html.push_str("<tr><th>");
        html.push_str(&index.to_string());
        html.push_str("</th>");
        for column in &columns {
            html.push_str("<td>");
            if let Some(value) = cell(row, column) {
                html.push_str(&encode(&RenderValue::from(value)));
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn object_table(map: &Map<String, Value>, mask: Option<&[Value]>) -> String {
    let keep: Option<Vec<String>> =
        mask.map(|mask| mask.iter().filter_map(column_name).collect());

    let mut html =
        String::from("<table><thead><tr><th>(index)</th><th>Values</th></tr></thead><tbody>");
    for (key, value) in map {
        if let Some(keep) = &keep {
            if !keep.contains(key) {
                continue;
            }
        }
        html.push_str("<tr><th>");
        html.push_str(key);
        html.push_str("</th><td>");
        html.push_str(&encode(&RenderValue::from(value)));
        html.push_str("</td></tr>");
    }
    html.push_str("</tbody></table>");
    html
}

fn push_unique(columns: &mut Vec<String>, column: String) {
    if !columns.contains(&column) {
        columns.push(column);
    }
}

/// Mask entries compare by their scalar text; compound entries match
/// nothing.
fn column_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The value shown at one row/column intersection.
fn cell<'a>(row: &'a Value, column: &str) -> Option<&'a Value> {
    match row {
        Value::Array(items) => column.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Object(map) => map.get(column),
        scalar => (column == "Values").then_some(scalar),
    }
}
