//! Argument processing: canonical records become console commands.
//!
//! The processor validates the method name, short-circuits assertions,
//! decides between an explicit substitution pattern and an auto-generated
//! one, and appends the origin fileline. It consults one read-only
//! [`StyleConfig`](crate::StyleConfig) snapshot for the whole batch and
//! never fails; a record either yields a command or is suppressed.

use serde_json::Value;

use crate::directive::{contains_directive, unescape};
use crate::method::Method;
use crate::record::{normalize, CanonicalRecord, RawBatch};
use crate::style::{StyleCategory, StyleConfig};
use crate::value::RenderValue;

/// Key a producer sets on an object argument to tag it with a class name.
pub const CLASS_NAME_KEY: &str = "___class_name";

/// One executable console command.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub method: Method,
    /// Positional arguments. When the record carried or generated a
    /// substitution pattern, it is the first argument as a `Text` value.
    pub args: Vec<RenderValue>,
}

impl Command {
    pub fn new(method: Method, args: Vec<RenderValue>) -> Self {
        Self { method, args }
    }
}

/// Processes canonical records against one style snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Processor<'a> {
    styles: &'a StyleConfig,
}

impl<'a> Processor<'a> {
    pub fn new(styles: &'a StyleConfig) -> Self {
        Self { styles }
    }

    /// Normalizes and processes a whole batch, preserving row order and
    /// dropping suppressed records.
    pub fn process_batch(&self, batch: &RawBatch) -> Vec<Command> {
        normalize(batch)
            .into_iter()
            .filter_map(|record| self.process_record(record))
            .collect()
    }

    /// Processes one record. `None` means the record is suppressed: a
    /// passing assertion renders nothing.
    pub fn process_record(&self, record: CanonicalRecord) -> Option<Command> {
        let mut method = Method::parse(&record.method).unwrap_or(Method::Log);
        let mut args = record.log;

        if method == Method::Assert {
            let condition = if args.is_empty() {
                None
            } else {
                Some(args.remove(0))
            };
            if condition.as_ref().is_some_and(truthy) {
                return None;
            }
            method = Method::Error;
        }

        let mut pattern = String::new();
        let mut out: Vec<RenderValue> = Vec::new();
        let mut fileline = record.backtrace;

        if method.is_formattable() && !args.is_empty() {
            let explicit = args
                .first()
                .and_then(Value::as_str)
                .map_or(false, contains_directive);

            if explicit {
                let mut iter = args.into_iter();
                if let Some(Value::String(s)) = iter.next() {
                    pattern = s;
                }
                out.extend(iter.map(RenderValue::from));
            } else {
                pattern = self.generate_pattern(method, args, &mut out);
            }
        } else {
            // Straight arguments for every other method, and for
            // formattable calls with nothing to format; these also lose
            // their origin line.
            out.extend(args.into_iter().map(RenderValue::from));
            fileline = None;
        }

        if let Some(origin) = fileline {
            if !pattern.is_empty() {
                pattern.push(' ');
            }
            pattern.push_str("%c%s");
            out.push(self.style_token(StyleCategory::Fileline));
            out.push(RenderValue::Text(origin));
        }

        let mut command_args = Vec::with_capacity(out.len() + 1);
        if !pattern.is_empty() {
            command_args.push(RenderValue::Text(pattern));
        }
        command_args.extend(out);
        Some(Command::new(method, command_args))
    }

    /// Builds the `%c%s%c`-per-scalar pattern for a formattable record
    /// without an explicit one, pushing the matching arguments.
    fn generate_pattern(
        &self,
        method: Method,
        args: Vec<Value>,
        out: &mut Vec<RenderValue>,
    ) -> String {
        let category = method.style_category().unwrap_or(StyleCategory::Log);
        let mut tokens: Vec<&str> = Vec::new();

        for mut arg in args {
            // A class-name marker adds a styled token; the stripped
            // object still renders through %o afterwards.
            if let Value::Object(map) = &mut arg {
                if let Some(marker) = map.remove(CLASS_NAME_KEY) {
                    tokens.push("%c%s%c");
                    out.push(self.style_token(StyleCategory::Classname));
                    out.push(RenderValue::from(marker));
                    out.push(RenderValue::Style(String::new()));
                }
            }
            match arg {
                Value::String(s) => {
                    tokens.push("%c%s%c");
                    out.push(self.style_token(category));
                    out.push(RenderValue::Text(unescape(&s)));
                    out.push(RenderValue::Style(String::new()));
                }
                Value::Number(n) => {
                    tokens.push("%c%s%c");
                    out.push(self.style_token(StyleCategory::Number));
                    out.push(RenderValue::Number(n));
                    out.push(RenderValue::Style(String::new()));
                }
                other => {
                    tokens.push("%o");
                    out.push(RenderValue::from(other));
                }
            }
        }

        tokens.join(" ")
    }

    fn style_token(&self, category: StyleCategory) -> RenderValue {
        RenderValue::Style(self.styles.style(category).to_string())
    }
}

/// Convenience wrapper: one batch through a transient [`Processor`].
pub fn process_batch(styles: &StyleConfig, batch: &RawBatch) -> Vec<Command> {
    Processor::new(styles).process_batch(batch)
}

/// Truthiness the way the wire's producers mean it: empty strings, zero,
/// `false` and `null` are falsy; every array and object is truthy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
