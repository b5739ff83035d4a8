//! Protocol layer for server-side console logging over HTTP headers.
//!
//! Producers serialize console calls into a JSON batch, base64 it into a
//! response header, and a viewer replays the calls. This crate owns the
//! data model and the per-record decisions of that replay:
//!
//! - Batch normalization: loose `{columns, rows}` JSON into canonical
//!   records of `(log arguments, backtrace, method)`
//! - Method validation against the known console vocabulary
//! - Directive scanning for `printf`-style substitution patterns
//!   (`%c`, `%s`, `%o`, `%O`, `%i`, `%d`, `%f`, with optional
//!   `%.<digits>` precision on the numeric ones)
//! - Pattern generation for records that did not bring their own,
//!   wrapping each scalar argument in style/text/style-reset tokens
//! - Display styling: per-category CSS fragments with stock values,
//!   YAML-loadable overrides and declaration-level validation
//!
//! The output is a flat list of [`Command`]s; rendering them into markup
//! and maintaining grouped console state belong to the crates above.
//!
//! # Quick Start
//!
//! ```rust
//! use logpane_protocol::{process_batch, RawBatch, StyleConfig};
//! use serde_json::json;
//!
//! // One row: arguments, backtrace, method.
//! let batch = RawBatch::from_rows(vec![
//!     json!([["hello", 42], "app.php:3", "warn"]),
//! ]);
//!
//! let commands = process_batch(&StyleConfig::default(), &batch);
//! assert_eq!(commands.len(), 1);
//! assert_eq!(commands[0].method.as_str(), "warn");
//! // Pattern first, then style/value pairs, then the fileline.
//! assert!(commands[0].args[0].is_text());
//! ```
//!
//! # Escaping
//!
//! A literal percent is written `%%`. Detection treats `%%s` as escaped
//! (no directive), while the render-time scanner substitutes at every
//! match it sees; auto-generated patterns therefore collapse escapes in
//! the argument text before it is wrapped, and explicit patterns keep
//! them for the renderer.

mod css;
mod directive;
mod method;
mod process;
mod record;
mod style;
mod value;

// Re-export public API
pub use directive::{contains_directive, unescape, Directive, Token, Tokenizer};
pub use method::Method;
pub use process::{process_batch, Command, Processor, CLASS_NAME_KEY};
pub use record::{normalize, CanonicalRecord, RawBatch, DEFAULT_COLUMNS};
pub use style::{ConfigError, StyleCategory, StyleConfig};
pub use value::RenderValue;
