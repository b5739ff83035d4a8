//! End-to-end delivery: style snapshot, argument processing, and ordered
//! handoff to console surfaces.
//!
//! A [`Pipeline`] owns the [`SurfaceRouter`] and a [`StyleStore`]. Each
//! delivery reserves its slot first, snapshots the styles once, processes
//! the batch under that snapshot, and commits the resulting commands. A
//! delivery that cannot produce commands still releases its slot so later
//! batches are never blocked behind it.

use logpane_console::{Surface, SurfaceId, SurfaceRouter, Ticket};
use logpane_protocol::{
    process_batch, Command, ConfigError, RawBatch, StyleCategory, StyleConfig,
};
use serde_json::json;
use tracing::error;

use crate::wire::{decode_header, DecodeError, RequestLine};

/// Source of the effective style configuration.
///
/// The pipeline snapshots once per delivery, so every row of a batch
/// renders under one consistent configuration even while the backing
/// store reloads.
pub trait StyleStore {
    fn snapshot(&self) -> Result<StyleConfig, ConfigError>;
}

/// A fixed in-memory configuration. The store most callers want.
#[derive(Debug, Clone, Default)]
pub struct StaticStyles(pub StyleConfig);

impl StyleStore for StaticStyles {
    fn snapshot(&self) -> Result<StyleConfig, ConfigError> {
        Ok(self.0.clone())
    }
}

/// The reconstruction pipeline, from decoded batches to rendered surfaces.
#[derive(Debug, Default)]
pub struct Pipeline<S> {
    store: S,
    router: SurfaceRouter,
}

impl<S: StyleStore> Pipeline<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            router: SurfaceRouter::new(),
        }
    }

    /// Reserves the next delivery slot for a surface.
    ///
    /// Call at arrival time, then [`complete`](Self::complete) the slot
    /// once the batch's commands exist. Slow processing of one batch never
    /// reorders a surface: slots flush in the order they were reserved.
    pub fn begin(&mut self, id: &SurfaceId) -> Ticket {
        self.router.begin(id)
    }

    /// Processes a batch and delivers it into its reserved slot.
    ///
    /// When `request` is given and the style snapshot enables request
    /// lines, the delivery starts with a synthetic heading row naming the
    /// request. A snapshot failure drops the whole batch, releasing the
    /// slot so the surface keeps flowing.
    pub fn complete(
        &mut self,
        id: &SurfaceId,
        ticket: Ticket,
        batch: &RawBatch,
        request: Option<&RequestLine>,
    ) {
        match self.store.snapshot() {
            Ok(styles) => {
                let mut commands = Vec::new();
                if let Some(request) = request {
                    if styles.display_request_line {
                        commands.extend(request_line_commands(&styles, request));
                    }
                }
                commands.extend(process_batch(&styles, batch));
                self.router.commit(id, ticket, commands);
            }
            Err(e) => {
                error!(surface = %id, error = %e, "style snapshot failed, dropping batch");
                self.router.abort(id, ticket);
            }
        }
    }

    /// Reserves a slot and completes it in one step.
    ///
    /// Use when batches for a surface arrive pre-ordered; concurrent
    /// arrivals should split [`begin`](Self::begin) from
    /// [`complete`](Self::complete) instead.
    pub fn deliver(&mut self, id: &SurfaceId, batch: &RawBatch, request: Option<&RequestLine>) {
        let ticket = self.begin(id);
        self.complete(id, ticket, batch, request);
    }

    /// Decodes a data header value and delivers the batch it carries.
    ///
    /// Decoding happens before any slot is reserved: a bad header leaves
    /// the surface exactly as it was.
    pub fn deliver_header(
        &mut self,
        id: &SurfaceId,
        value: &str,
        request: Option<&RequestLine>,
    ) -> Result<(), DecodeError> {
        let batch = decode_header(value)?;
        self.deliver(id, &batch, request);
        Ok(())
    }

    pub fn router(&self) -> &SurfaceRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut SurfaceRouter {
        &mut self.router
    }

    pub fn surface(&self, id: &SurfaceId) -> Option<&Surface> {
        self.router.surface(id)
    }

    /// Projects one surface's tree as HTML.
    pub fn render_html(&self, id: &SurfaceId) -> Option<String> {
        self.router.render_html(id)
    }
}

/// Builds the synthetic heading commands for a request line.
///
/// The heading is an ordinary one-row batch: a styled pattern followed by
/// the method and URL, processed like any producer-sent row.
fn request_line_commands(styles: &StyleConfig, request: &RequestLine) -> Vec<Command> {
    let row = json!([[
        "%c%s %s",
        styles.style(StyleCategory::Header),
        request.method,
        request.url,
    ]]);
    process_batch(styles, &RawBatch::from_rows(vec![row]))
}
