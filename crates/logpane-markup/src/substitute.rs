//! Directive substitution: one pattern plus positional arguments.
//!
//! A single forward scan over the pattern with an argument cursor. The
//! Nth directive always consumes the Nth argument; arguments left over
//! when the pattern runs out are appended, each encoded.

use logpane_protocol::{Directive, RenderValue, Token, Tokenizer};

use crate::encode::encode;
use crate::html::{escape, escape_attr};

/// Renders a pattern against its argument list.
pub fn substitute(pattern: &str, args: &[RenderValue]) -> String {
    let mut out = String::new();
    let mut cursor = 0usize;
    let mut span_open = false;

    for token in Tokenizer::new(pattern) {
        match token {
            Token::Text(text) => out.push_str(&escape(text)),
            Token::Directive(directive) => {
                let arg = args.get(cursor);
                cursor += 1;

                match directive {
                    Directive::Style => {
                        if span_open {
                            out.push_str("</span>");
                        }
                        let style = arg.map_or("", RenderValue::style_text);
                        out.push_str("<span style=\"");
                        out.push_str(&escape_attr(style));
                        out.push_str("\">");
                        span_open = true;
                    }
                    Directive::Text => {
                        if let Some(arg) = arg {
                            out.push_str(&escape(&arg.substitution_text()));
                        }
                    }
                    Directive::Object => {
                        out.push_str(&encode(arg.unwrap_or(&RenderValue::Undefined)));
                    }
                    Directive::Integer { precision } => {
                        let value = arg.map_or(0.0, RenderValue::coerce_number);
                        let rendered = (value.trunc() as i64).to_string();
                        out.push_str(&format!("{rendered:0>precision$}"));
                    }
                    Directive::Float { precision } => {
                        let value = arg.map_or(0.0, RenderValue::coerce_number);
                        if precision == 0 {
                            out.push_str(&value.to_string());
                        } else {
                            out.push_str(&to_precision(value, precision));
                        }
                    }
                }
            }
        }
    }

    if span_open {
        out.push_str("</span>");
    }

    for arg in &args[cursor.min(args.len())..] {
        out.push(' ');
        out.push_str(&encode(arg));
    }

    out
}

/// Reformats to `digits(integer part) + precision` significant digits,
/// always in plain decimal notation. The integer-part digit count is
/// taken from the truncated value's rendering, sign included.
fn to_precision(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = (value.trunc() as i64).to_string().len() + precision;
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0_f64);
    }

    let mut magnitude = value.abs();
    let mut exponent: i64 = 0;
    while magnitude >= 10.0 {
        magnitude /= 10.0;
        exponent += 1;
    }
    while magnitude < 1.0 {
        magnitude *= 10.0;
        exponent -= 1;
    }

    let fraction = (digits as i64 - 1 - exponent).max(0) as usize;
    format!("{value:.fraction$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> RenderValue {
        RenderValue::Text(s.to_string())
    }

    fn style(s: &str) -> RenderValue {
        RenderValue::Style(s.to_string())
    }

    // ==================== Directive basics ====================

    #[test]
    fn text_directive_escapes_its_argument() {
        assert_eq!(substitute("value: %s!", &[text("a<b")]), "value: a&lt;b!");
    }

    #[test]
    fn literal_text_is_escaped_too() {
        assert_eq!(substitute("a<b %s", &[text("x")]), "a&lt;b x");
    }

    #[test]
    fn structured_argument_substitutes_as_compact_json() {
        assert_eq!(
            substitute("%s", &[RenderValue::from(json!({"a": 1}))]),
            "{\"a\":1}"
        );
    }

    #[test]
    fn object_directive_delegates_to_encoder() {
        assert_eq!(
            substitute("%o", &[RenderValue::Bool(true)]),
            "<span class=\"boolean\">true</span>"
        );
        assert_eq!(
            substitute("%O", &[text("plain")]),
            "<span class=\"string\">plain</span>"
        );
    }

    // ==================== Style spans ====================

    #[test]
    fn style_spans_are_siblings_not_nested() {
        assert_eq!(
            substitute("%cA%cB", &[style("color:red;"), style("color:blue;")]),
            "<span style=\"color:red;\">A</span><span style=\"color:blue;\">B</span>"
        );
    }

    #[test]
    fn trailing_style_span_closes_at_end() {
        assert_eq!(
            substitute("%chi", &[style("color:red;")]),
            "<span style=\"color:red;\">hi</span>"
        );
    }

    #[test]
    fn style_values_are_attribute_escaped() {
        assert_eq!(
            substitute("%cx", &[style("font-family:\"Fira\";")]),
            "<span style=\"font-family:&quot;Fira&quot;;\">x</span>"
        );
    }

    // ==================== Numeric directives ====================

    #[test]
    fn integer_directive_truncates() {
        assert_eq!(substitute("%d", &[text("3.9")]), "3");
        assert_eq!(substitute("%i", &[RenderValue::from(json!(-7.5))]), "-7");
    }

    #[test]
    fn integer_precision_pads_with_zeros() {
        assert_eq!(substitute("%.5d", &[RenderValue::from(json!(42))]), "00042");
        assert_eq!(substitute("%.5d", &[RenderValue::from(json!(-42))]), "00-42");
    }

    #[test]
    fn non_numeric_coerces_to_zero() {
        assert_eq!(substitute("%d", &[text("many")]), "0");
        assert_eq!(substitute("%f", &[RenderValue::Null]), "0");
    }

    #[test]
    fn float_precision_counts_from_integer_digits() {
        assert_eq!(
            substitute("%.2f", &[RenderValue::from(json!(3.14159))]),
            "3.14"
        );
        assert_eq!(
            substitute("%.2f", &[RenderValue::from(json!(-3.14159))]),
            "-3.142"
        );
        assert_eq!(substitute("%.1f", &[RenderValue::from(json!(42.72))]), "42.7");
        assert_eq!(substitute("%.2f", &[RenderValue::from(json!(0.5))]), "0.500");
    }

    #[test]
    fn bare_float_renders_plainly() {
        assert_eq!(substitute("%f", &[RenderValue::from(json!(2.5))]), "2.5");
        assert_eq!(substitute("%f", &[RenderValue::from(json!(7))]), "7");
    }

    // ==================== Pairing and leftovers ====================

    #[test]
    fn pairing_is_left_to_right() {
        assert_eq!(
            substitute("%s-%d", &[text("a"), RenderValue::from(json!(7))]),
            "a-7"
        );
    }

    #[test]
    fn escape_blind_scan_consumes_both_arguments() {
        assert_eq!(
            substitute("ok %s and %%d", &[text("yes"), RenderValue::from(json!(9))]),
            "ok yes and %9"
        );
    }

    #[test]
    fn missing_arguments_use_defaults() {
        assert_eq!(
            substitute("%s-%d-%c.", &[]),
            "-0-<span style=\"\">.</span>"
        );
        assert_eq!(substitute("%o", &[]), "<span class=\"null\">undefined</span>");
    }

    #[test]
    fn leftover_arguments_append_encoded() {
        assert_eq!(
            substitute("n: %d", &[RenderValue::from(json!(1)), text("extra")]),
            "n: 1 <span class=\"string\">extra</span>"
        );
    }

    #[test]
    fn pattern_without_directives_keeps_all_leftovers() {
        assert_eq!(
            substitute("hi", &[RenderValue::Bool(true)]),
            "hi <span class=\"boolean\">true</span>"
        );
    }

    // ==================== Properties ====================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn percent_free() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9 <>&]{0,24}"
        }

        proptest! {
            #[test]
            fn directive_free_patterns_render_escaped(pattern in percent_free()) {
                prop_assert_eq!(substitute(&pattern, &[]), escape(&pattern));
            }

            #[test]
            fn every_text_directive_consumes_one_argument(count in 0usize..6) {
                let pattern = vec!["%s"; count].join(" ");
                let args: Vec<RenderValue> =
                    (0..count).map(|i| RenderValue::Text(i.to_string())).collect();
                let rendered = substitute(&pattern, &args);
                for i in 0..count {
                    prop_assert!(rendered.contains(&i.to_string()));
                }
                prop_assert!(!rendered.contains("<span class=\"string\">"));
            }

            #[test]
            fn style_spans_stay_balanced(styles in prop::collection::vec("[a-z:;-]{0,12}", 0..5)) {
                let pattern = vec!["%cx"; styles.len()].join("");
                let args: Vec<RenderValue> =
                    styles.iter().map(|s| RenderValue::Style(s.clone())).collect();
                let rendered = substitute(&pattern, &args);
                prop_assert_eq!(
                    rendered.matches("<span").count(),
                    rendered.matches("</span>").count()
                );
            }
        }
    }
}
