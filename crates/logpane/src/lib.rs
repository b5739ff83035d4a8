//! # Logpane - ChromeLogger Console Reconstruction
//!
//! Logpane rebuilds browser-style consoles from server-side logging
//! payloads. Producers (ChromeLogger, ChromePHP and compatible libraries)
//! serialize log calls into a response header; Logpane decodes those
//! headers and reconstructs what the browser console would have shown,
//! as an HTML tree. It provides:
//!
//! - Header decoding (base64 + JSON) for both ChromeLogger and ChromePHP
//! - Row normalization with column-order and default handling
//! - Full `%`-directive substitution (`%s`, `%c`, `%o`, `%d`, `%.2f`, ...)
//! - Auto-generated patterns with per-method styling for plain arguments
//! - Object, XML and table rendering with syntax-colored markup
//! - Stateful surfaces: group nesting, `clear`, `assert`, `table`
//! - Ordered delivery per surface, even when batches finish out of order
//!
//! ## Core Concepts
//!
//! - [`RawBatch`]: a decoded payload, rows plus optional column header
//! - [`Pipeline`]: styles + router, turns batches into rendered surfaces
//! - [`Surface`]: one console's state (its tree and open group stack)
//! - [`SurfaceId`] / [`Ticket`]: addressing and per-surface delivery order
//! - [`StyleConfig`]: per-category inline CSS consulted while processing
//! - [`StyleStore`]: where the pipeline snapshots styles from
//!
//! ## Quick Start
//!
//! ```rust
//! use base64::engine::general_purpose::STANDARD;
//! use base64::Engine;
//! use logpane::{Pipeline, StaticStyles, SurfaceId};
//!
//! // A producer would put this in an x-chromelogger-data header.
//! let payload = serde_json::json!({
//!     "columns": ["log", "backtrace", "type"],
//!     "rows": [
//!         [["request"], false, "groupCollapsed"],
//!         [["loaded %d items", 3], "app.php:14", "info"],
//!         [[], false, "groupEnd"],
//!     ],
//! });
//! let header = STANDARD.encode(payload.to_string());
//!
//! let mut pipeline = Pipeline::new(StaticStyles::default());
//! let tab = SurfaceId::from("tab-7");
//! pipeline.deliver_header(&tab, &header, None)?;
//!
//! let html = pipeline.render_html(&tab).unwrap();
//! assert!(html.contains("loaded 3 items"));
//! assert!(html.contains("app.php:14"));
//! # Ok::<(), logpane::DecodeError>(())
//! ```
//!
//! ## Delivery Ordering
//!
//! Batches for one surface render in arrival order no matter how long
//! each takes to process. Reserve a slot with [`Pipeline::begin`] when a
//! batch arrives, then [`Pipeline::complete`] it whenever processing
//! finishes; the router parks early finishers until their turn.
//!
//! ```rust
//! use logpane::{Pipeline, RawBatch, StaticStyles, SurfaceId};
//! use serde_json::json;
//!
//! let mut pipeline = Pipeline::new(StaticStyles::default());
//! let tab = SurfaceId::from("tab-7");
//!
//! let first = pipeline.begin(&tab);
//! let second = pipeline.begin(&tab);
//!
//! // The later batch finishes first; it parks until its slot is up.
//! pipeline.complete(&tab, second, &RawBatch::from_rows(vec![json!([["b"]])]), None);
//! assert_eq!(pipeline.surface(&tab).unwrap().nodes().len(), 0);
//!
//! pipeline.complete(&tab, first, &RawBatch::from_rows(vec![json!([["a"]])]), None);
//! assert_eq!(pipeline.surface(&tab).unwrap().nodes().len(), 2);
//! ```
//!
//! ## Styling
//!
//! Auto-generated patterns wrap string and number arguments in styled
//! spans. The styles come from a [`StyleConfig`], which layers overrides
//! on stock defaults and can be loaded from YAML:
//!
//! ```rust
//! use logpane::{StyleCategory, StyleConfig};
//!
//! let styles = StyleConfig::from_yaml("styles:\n  error: \"color:crimson;\"\n")?;
//! assert_eq!(styles.style(StyleCategory::Error), "color:crimson;");
//! // Unset categories keep their stock styles.
//! assert_eq!(styles.style(StyleCategory::Warn), "color:orange;");
//! # Ok::<(), logpane::ConfigError>(())
//! ```
//!
//! A [`StyleStore`] hands the pipeline a fresh snapshot per delivery, so
//! a reloadable configuration never changes styling mid-batch.
//!
//! ## Layering
//!
//! The heavy lifting lives in three focused crates, re-exported here:
//! `logpane-protocol` (wire model, normalization, argument processing),
//! `logpane-markup` (substitution and object/XML encoding) and
//! `logpane-console` (surfaces, grouping, tables, routing). Depend on
//! this crate unless you need exactly one layer.

// Facade-specific modules
mod pipeline;
mod wire;

// Wire model and normalization (from logpane-protocol)
pub use logpane_protocol::{normalize, CanonicalRecord, RawBatch, DEFAULT_COLUMNS};

// Directive grammar (from logpane-protocol)
pub use logpane_protocol::{contains_directive, unescape, Directive, Token, Tokenizer};

// Argument processing (from logpane-protocol)
pub use logpane_protocol::{process_batch, Command, Method, Processor, RenderValue, CLASS_NAME_KEY};

// Style configuration (from logpane-protocol)
pub use logpane_protocol::{ConfigError, StyleCategory, StyleConfig};

// Markup emission (from logpane-markup)
pub use logpane_markup::{encode, escape, escape_attr, substitute};

// Console surfaces and routing (from logpane-console)
pub use logpane_console::{
    render_html, ConsoleError, RenderNode, Surface, SurfaceId, SurfaceRouter, Ticket,
};

// Header transport (facade-specific)
pub use wire::{decode_header, is_data_header, DecodeError, RequestLine, DATA_HEADERS};

// Delivery pipeline (facade-specific)
pub use pipeline::{Pipeline, StaticStyles, StyleStore};
