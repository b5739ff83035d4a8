//! Value encoding into inspectable markup.
//!
//! Scalars become type-tagged inline spans. Structured values are pretty
//! printed as JSON and re-tokenized into spans, with every bracket that
//! opens a new line wrapped in a collapsible `block` container. Strings
//! shaped like a markup fragment are tentatively parsed as XML first.

use logpane_protocol::RenderValue;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::html::escape;
use crate::xml;

/// How a string argument is going to render.
#[derive(Debug)]
pub(crate) enum Classified<'a> {
    /// Ordinary text, rendered as a string span.
    PlainText(&'a str),
    /// Parsed markup, rendered by the XML sub-encoder.
    Markup(xml::XmlElement),
    /// Looked like markup but did not parse; rendered structurally.
    Structured(&'a str),
}

/// Classifies a string argument. The markup shape is a whole-string test:
/// optional surrounding whitespace around a single-line `<...>`.
pub(crate) fn classify(text: &str) -> Classified<'_> {
    let trimmed = text.trim();
    let shaped = trimmed.len() >= 2
        && trimmed.starts_with('<')
        && trimmed.ends_with('>')
        && !trimmed.contains(['\n', '\r']);
    if !shaped {
        return Classified::PlainText(text);
    }
    match xml::parse(trimmed) {
        Some(root) => Classified::Markup(root),
        None => Classified::Structured(text),
    }
}

/// Encodes one value as markup.
pub fn encode(value: &RenderValue) -> String {
    match value {
        RenderValue::Null => "<span class=\"null\">null</span>".to_string(),
        RenderValue::Undefined => "<span class=\"null\">undefined</span>".to_string(),
        RenderValue::Bool(b) => format!("<span class=\"boolean\">{b}</span>"),
        RenderValue::Number(n) => format!("<span class=\"number\">{n}</span>"),
        RenderValue::Text(s) | RenderValue::Style(s) => match classify(s) {
            Classified::PlainText(text) => format!("<span class=\"string\">{text}</span>"),
            Classified::Markup(root) => {
                format!("<span class=\"object\">{}</span>", xml::render(&root))
            }
            Classified::Structured(text) => {
                let value = Value::String(text.to_string());
                format!("<span class=\"object\">{}</span>", structured(&value))
            }
        },
        RenderValue::Data(value) => {
            format!("<span class=\"object\">{}</span>", structured(value))
        }
    }
}

/// Pretty prints a JSON value with 4-space indentation and re-tokenizes
/// the text into spans.
fn structured(value: &Value) -> String {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    if value.serialize(&mut serializer).is_err() {
        return escape(&value.to_string());
    }
    tokenize(&String::from_utf8_lossy(&buffer))
}

/// Walks the pretty JSON byte by byte, wrapping tokens in spans:
/// keys (unquoted when plain identifiers), string values, numbers,
/// booleans, null, and the line-opening brackets that form blocks.
fn tokenize(json: &str) -> String {
    let bytes = json.as_bytes();
    let mut out = String::with_capacity(json.len() * 2);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = emit_string(json, i, &mut out),
            b'-' | b'0'..=b'9' => i = emit_number(json, i, &mut out),
            b't' if json[i..].starts_with("true") => {
                out.push_str("<span class=\"boolean\">true</span>");
                i += 4;
            }
            b'f' if json[i..].starts_with("false") => {
                out.push_str("<span class=\"boolean\">false</span>");
                i += 5;
            }
            b'n' if json[i..].starts_with("null") => {
                out.push_str("<span class=\"null\">null</span>");
                i += 4;
            }
            open @ (b'{' | b'[') if bytes.get(i + 1) == Some(&b'\n') => {
                out.push_str("<span class=\"bracket\">");
                out.push(open as char);
                out.push_str("</span><span class=\"block\">\n");
                i += 2;
            }
            b'\n' => {
                // A close bracket on its own line ends the block before
                // the bracket span.
                let mut j = i + 1;
                while j < bytes.len() && bytes[j] == b' ' {
                    j += 1;
                }
                match bytes.get(j) {
                    Some(close @ (b'}' | b']')) => {
                        out.push_str(&json[i..j]);
                        out.push_str("</span><span class=\"bracket\">");
                        out.push(*close as char);
                        out.push_str("</span>");
                        i = j + 1;
                    }
                    _ => {
                        out.push('\n');
                        i += 1;
                    }
                }
            }
            _ => {
                push_escaped(&mut out, bytes[i] as char);
                i += 1;
            }
        }
    }

    out
}

/// Emits one string token starting at the opening quote; returns the index
/// after it. A token followed directly by a colon is a key.
fn emit_string(json: &str, start: usize, out: &mut String) -> usize {
    let bytes = json.as_bytes();
    let mut j = start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => break,
            _ => j += 1,
        }
    }

    let inner = &json[start + 1..j.min(json.len())];
    let is_key = bytes.get(j + 1) == Some(&b':');

    if is_key {
        out.push_str("<span class=\"key\">");
        if is_identifier(inner) {
            out.push_str(&escape(inner));
        } else {
            out.push('"');
            out.push_str(&escape(&flatten_escapes(inner)));
            out.push('"');
        }
        out.push_str(":</span>");
        j + 2
    } else {
        out.push_str("<span class=\"string\">\"");
        out.push_str(&escape(&flatten_escapes(inner)));
        out.push_str("\"</span>");
        j + 1
    }
}

fn emit_number(json: &str, start: usize, out: &mut String) -> usize {
    let bytes = json.as_bytes();
    let mut j = start + 1;
    while j < bytes.len()
        && matches!(bytes[j], b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
    {
        j += 1;
    }
    out.push_str("<span class=\"number\">");
    out.push_str(&json[start..j]);
    out.push_str("</span>");
    j
}

fn is_identifier(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Drops every backslash, keeping the character it escaped.
fn flatten_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> String {
        encode(&RenderValue::Data(value))
    }

    // ==================== Scalars ====================

    #[test]
    fn scalars_render_as_tagged_spans() {
        assert_eq!(
            encode(&RenderValue::Text("plain".to_string())),
            "<span class=\"string\">plain</span>"
        );
        assert_eq!(
            encode(&RenderValue::from(serde_json::json!(42))),
            "<span class=\"number\">42</span>"
        );
        assert_eq!(
            encode(&RenderValue::Bool(false)),
            "<span class=\"boolean\">false</span>"
        );
    }

    #[test]
    fn string_text_is_not_escaped() {
        assert_eq!(
            encode(&RenderValue::Text("a < b".to_string())),
            "<span class=\"string\">a < b</span>"
        );
    }

    #[test]
    fn null_and_undefined_render_placeholders() {
        assert_eq!(encode(&RenderValue::Null), "<span class=\"null\">null</span>");
        assert_eq!(
            encode(&RenderValue::Undefined),
            "<span class=\"null\">undefined</span>"
        );
    }

    // ==================== Structured values ====================

    #[test]
    fn small_object_tokenizes_into_spans() {
        assert_eq!(
            data(json!({"a": 1})),
            "<span class=\"object\">\
             <span class=\"bracket\">{</span><span class=\"block\">\n    \
             <span class=\"key\">a:</span> <span class=\"number\">1</span>\
             \n</span><span class=\"bracket\">}</span></span>"
        );
    }

    #[test]
    fn empty_compounds_stay_inline() {
        assert_eq!(data(json!({})), "<span class=\"object\">{}</span>");
        assert_eq!(data(json!([])), "<span class=\"object\">[]</span>");
    }

    #[test]
    fn non_identifier_keys_keep_quotes() {
        let html = data(json!({"a b": 1}));
        assert!(html.contains("<span class=\"key\">\"a b\":</span>"));
    }

    #[test]
    fn identifier_keys_drop_quotes() {
        let html = data(json!({"snake_case_9": true}));
        assert!(html.contains("<span class=\"key\">snake_case_9:</span>"));
        assert!(html.contains("<span class=\"boolean\">true</span>"));
    }

    #[test]
    fn string_escapes_are_flattened() {
        let html = data(json!({"a": "line\nbreak \"quoted\""}));
        assert!(html.contains(
            "<span class=\"string\">\"linenbreak \"quoted\"\"</span>"
        ));
    }

    #[test]
    fn nested_blocks_wrap_each_bracket_pair() {
        let html = data(json!({"outer": {"inner": [1]}}));
        assert_eq!(html.matches("<span class=\"block\">").count(), 3);
        assert_eq!(html.matches("</span><span class=\"bracket\">").count(), 3);
    }

    #[test]
    fn array_values_and_html_text_escape() {
        let html = data(json!(["<b>", -2.5]));
        assert!(html.contains("<span class=\"string\">\"&lt;b&gt;\"</span>"));
        assert!(html.contains("<span class=\"number\">-2.5</span>"));
    }

    // ==================== Markup classification ====================

    #[test]
    fn markup_shaped_strings_render_as_xml() {
        let html = encode(&RenderValue::Text("<a>hi</a>".to_string()));
        assert!(html.starts_with("<span class=\"object\">\n<span class=\"bracket\">&lt;</span>"));
        assert!(html.contains("<span class=\"tag\">a</span>"));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let html = encode(&RenderValue::Text("  <a/>  ".to_string()));
        assert!(html.contains("<span class=\"tag\">a</span>"));
    }

    #[test]
    fn interior_newline_disables_markup_detection() {
        let html = encode(&RenderValue::Text("<a>\n</a>".to_string()));
        assert_eq!(html, "<span class=\"string\"><a>\n</a></span>");
    }

    #[test]
    fn malformed_markup_falls_back_to_structured() {
        assert_eq!(
            encode(&RenderValue::Text("<oops".to_string())),
            "<span class=\"string\"><oops</span>"
        );
        assert_eq!(
            encode(&RenderValue::Text("<a><b></a>".to_string())),
            "<span class=\"object\">\
             <span class=\"string\">\"&lt;a&gt;&lt;b&gt;&lt;/a&gt;\"</span></span>"
        );
    }
}
