//! Runtime values carried by console commands.
//!
//! The [`RenderValue`] enum is the currency between argument processing and
//! rendering: every positional argument of a command is one of these. Wire
//! values (JSON) convert losslessly; the `Undefined` and `Style` variants
//! only ever arise inside the pipeline (exhausted substitution arguments and
//! generated style tokens respectively).

use serde_json::{Number, Value};

/// One positional argument of a console command.
///
/// # Example
///
/// ```
/// use logpane_protocol::RenderValue;
///
/// let v = RenderValue::from(serde_json::json!("hello"));
/// assert!(v.is_text());
/// assert_eq!(v.substitution_text(), "hello");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RenderValue {
    /// String scalar.
    Text(String),
    /// Numeric scalar.
    Number(Number),
    /// Boolean scalar.
    Bool(bool),
    /// JSON null.
    Null,
    /// Absent value (no wire representation).
    Undefined,
    /// Structured payload: a JSON array or object.
    Data(Value),
    /// Inline CSS style token generated by the argument processor.
    Style(String),
}

impl RenderValue {
    /// Returns `true` if this is a `Text` value.
    pub fn is_text(&self) -> bool {
        matches!(self, RenderValue::Text(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, RenderValue::Number(_))
    }

    /// Returns `true` if this is a structured (array or object) value.
    pub fn is_data(&self) -> bool {
        matches!(self, RenderValue::Data(_))
    }

    /// Returns `true` if this is a style token.
    pub fn is_style(&self) -> bool {
        matches!(self, RenderValue::Style(_))
    }

    /// Extracts the string content, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the structured payload, if this is a `Data` value.
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            RenderValue::Data(v) => Some(v),
            _ => None,
        }
    }

    /// The value as substitution text, the way an `s` directive sees it.
    ///
    /// Strings pass through verbatim (escaping happens at markup emission),
    /// scalars print their literal form, and structured values print their
    /// compact JSON text.
    pub fn substitution_text(&self) -> String {
        match self {
            RenderValue::Text(s) => s.clone(),
            RenderValue::Number(n) => n.to_string(),
            RenderValue::Bool(b) => b.to_string(),
            RenderValue::Null => "null".to_string(),
            RenderValue::Undefined => "undefined".to_string(),
            RenderValue::Data(v) => v.to_string(),
            RenderValue::Style(s) => s.clone(),
        }
    }

    /// The value as a number, the way `d`, `i` and `f` directives see it.
    ///
    /// Numeric strings parse (surrounding whitespace ignored, empty string
    /// is zero), booleans count as one and zero, and everything
    /// non-numeric collapses to zero.
    pub fn coerce_number(&self) -> f64 {
        match self {
            RenderValue::Number(n) => n.as_f64().unwrap_or(0.0),
            RenderValue::Text(s) | RenderValue::Style(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(0.0)
                }
            }
            RenderValue::Bool(true) => 1.0,
            RenderValue::Bool(false) => 0.0,
            RenderValue::Null | RenderValue::Undefined | RenderValue::Data(_) => 0.0,
        }
    }

    /// The value as an inline style, the way a `c` directive sees it.
    ///
    /// Only strings and style tokens contribute a style; anything else is
    /// the empty style.
    pub fn style_text(&self) -> &str {
        match self {
            RenderValue::Style(s) | RenderValue::Text(s) => s,
            _ => "",
        }
    }
}

impl From<Value> for RenderValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RenderValue::Null,
            Value::Bool(b) => RenderValue::Bool(b),
            Value::Number(n) => RenderValue::Number(n),
            Value::String(s) => RenderValue::Text(s),
            Value::Array(_) | Value::Object(_) => RenderValue::Data(value),
        }
    }
}

impl From<&Value> for RenderValue {
    fn from(value: &Value) -> Self {
        RenderValue::from(value.clone())
    }
}

impl From<&str> for RenderValue {
    fn from(s: &str) -> Self {
        RenderValue::Text(s.to_string())
    }
}

impl From<String> for RenderValue {
    fn from(s: String) -> Self {
        RenderValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conversion_from_json() {
        assert_eq!(RenderValue::from(json!(null)), RenderValue::Null);
        assert_eq!(RenderValue::from(json!(true)), RenderValue::Bool(true));
        assert_eq!(
            RenderValue::from(json!("hi")),
            RenderValue::Text("hi".to_string())
        );
        assert!(RenderValue::from(json!([1, 2])).is_data());
        assert!(RenderValue::from(json!({"a": 1})).is_data());
    }

    #[test]
    fn substitution_text_per_variant() {
        assert_eq!(RenderValue::from(json!("x")).substitution_text(), "x");
        assert_eq!(RenderValue::from(json!(42)).substitution_text(), "42");
        assert_eq!(RenderValue::from(json!(4.5)).substitution_text(), "4.5");
        assert_eq!(RenderValue::from(json!(false)).substitution_text(), "false");
        assert_eq!(RenderValue::Null.substitution_text(), "null");
        assert_eq!(RenderValue::Undefined.substitution_text(), "undefined");
        assert_eq!(
            RenderValue::from(json!({"a": 1})).substitution_text(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(RenderValue::from(json!(5)).coerce_number(), 5.0);
        assert_eq!(RenderValue::from(json!("5.5")).coerce_number(), 5.5);
        assert_eq!(RenderValue::from(json!(" 7 ")).coerce_number(), 7.0);
        assert_eq!(RenderValue::from(json!("")).coerce_number(), 0.0);
        assert_eq!(RenderValue::from(json!("abc")).coerce_number(), 0.0);
        assert_eq!(RenderValue::Bool(true).coerce_number(), 1.0);
        assert_eq!(RenderValue::Null.coerce_number(), 0.0);
        assert_eq!(RenderValue::from(json!([1])).coerce_number(), 0.0);
    }

    #[test]
    fn style_coercion() {
        assert_eq!(
            RenderValue::Style("color:red;".to_string()).style_text(),
            "color:red;"
        );
        assert_eq!(RenderValue::from(json!("color:blue;")).style_text(), "color:blue;");
        assert_eq!(RenderValue::from(json!(3)).style_text(), "");
        assert_eq!(RenderValue::Undefined.style_text(), "");
    }
}
