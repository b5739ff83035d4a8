//! Stateful console reconstruction: commands in, render trees out.
//!
//! A [`Surface`] interprets an ordered stream of commands into a tree of
//! [`RenderNode`]s, tracking open groups as an implicit stack. The
//! [`SurfaceRouter`] keys surfaces by [`SurfaceId`] and serializes
//! delivery so concurrently processed batches still render in arrival
//! order. [`render_html`] projects a finished tree into the list markup
//! the viewing panel styles.
//!
//! ```rust
//! use logpane_console::{Surface, render_html};
//! use logpane_protocol::{Command, Method, RenderValue};
//!
//! let mut surface = Surface::new();
//! surface.execute(Command::new(
//!     Method::Group,
//!     vec![RenderValue::from("request")],
//! ))?;
//! surface.execute(Command::new(
//!     Method::Log,
//!     vec![RenderValue::from("handled")],
//! ))?;
//!
//! assert_eq!(
//!     render_html(&surface),
//!     "<ul class=\"console\">\
//!      <li class=\"group\">request<ul><li class=\"log\">handled</li></ul></li>\
//!      </ul>"
//! );
//! # Ok::<(), logpane_console::ConsoleError>(())
//! ```

mod node;
mod output;
mod router;
mod surface;
mod table;

// Re-export public API
pub use node::RenderNode;
pub use output::render_html;
pub use router::{SurfaceId, SurfaceRouter, Ticket};
pub use surface::{ConsoleError, Surface};
