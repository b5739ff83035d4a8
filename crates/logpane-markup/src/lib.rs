//! Markup rendering for replayed console output.
//!
//! Two entry points cover everything a console line needs:
//!
//! - [`substitute`] resolves a `printf`-style pattern against positional
//!   arguments, producing inline markup with style spans.
//! - [`encode`] renders a single value as inspectable markup: tagged
//!   scalar spans, pretty-printed JSON with collapsible blocks, or a
//!   syntax-highlighted XML tree for strings that parse as markup.
//!
//! ```rust
//! use logpane_markup::substitute;
//! use logpane_protocol::RenderValue;
//!
//! let html = substitute(
//!     "%c%s%c took %dms",
//!     &[
//!         RenderValue::Style("color:teal;".to_string()),
//!         RenderValue::Text("query".to_string()),
//!         RenderValue::Style(String::new()),
//!         RenderValue::from("12"),
//!     ],
//! );
//! assert_eq!(
//!     html,
//!     "<span style=\"color:teal;\">query</span><span style=\"\"> took 12ms</span>"
//! );
//! ```

mod encode;
mod html;
mod substitute;
mod xml;

// Re-export public API
pub use encode::encode;
pub use html::{escape, escape_attr};
pub use substitute::substitute;
