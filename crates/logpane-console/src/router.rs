//! Surface registry and per-surface delivery sequencing.
//!
//! Batches acquire a [`Ticket`] per surface at arrival. Commands commit
//! against that ticket and park until every earlier ticket has resolved,
//! so batches whose processing finishes out of order still render in
//! arrival order and never interleave.

use std::collections::BTreeMap;
use std::fmt;

use logpane_protocol::Command;
use tracing::warn;

use crate::output;
use crate::surface::Surface;

/// Identifies one output surface (one tab, in a devtools host).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SurfaceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One batch's delivery slot on one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Lane {
    surface: Surface,
    issued: u64,
    flushed: u64,
    parked: BTreeMap<u64, Vec<Command>>,
}

/// Owns all surfaces and serializes delivery per surface.
#[derive(Debug, Default)]
pub struct SurfaceRouter {
    lanes: BTreeMap<SurfaceId, Lane>,
}

impl SurfaceRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next delivery slot for a surface. Call at batch
    /// arrival, before any processing.
    pub fn begin(&mut self, id: &SurfaceId) -> Ticket {
        let lane = self.lanes.entry(id.clone()).or_default();
        let ticket = Ticket(lane.issued);
        lane.issued += 1;
        ticket
    }

    /// Delivers a batch's commands for its slot. Parks them until every
    /// earlier slot has resolved, then flushes in slot order.
    pub fn commit(&mut self, id: &SurfaceId, ticket: Ticket, commands: Vec<Command>) {
        let Some(lane) = self.lanes.get_mut(id) else {
            warn!(surface = %id, "commit for unknown surface");
            return;
        };
        if ticket.0 < lane.flushed {
            warn!(surface = %id, ticket = ticket.0, "commit for already flushed slot");
            return;
        }
        lane.parked.insert(ticket.0, commands);
        lane.flush(id);
    }

    /// Releases a slot whose batch was dropped, letting later batches
    /// flush.
    pub fn abort(&mut self, id: &SurfaceId, ticket: Ticket) {
        self.commit(id, ticket, Vec::new());
    }

    pub fn surface(&self, id: &SurfaceId) -> Option<&Surface> {
        self.lanes.get(id).map(|lane| &lane.surface)
    }

    pub fn surface_mut(&mut self, id: &SurfaceId) -> Option<&mut Surface> {
        self.lanes.get_mut(id).map(|lane| &mut lane.surface)
    }

    /// Drops a surface and everything parked for it.
    pub fn remove(&mut self, id: &SurfaceId) -> Option<Surface> {
        self.lanes.remove(id).map(|lane| lane.surface)
    }

    pub fn ids(&self) -> impl Iterator<Item = &SurfaceId> {
        self.lanes.keys()
    }

    /// Projects one surface's tree as HTML.
    pub fn render_html(&self, id: &SurfaceId) -> Option<String> {
        self.surface(id).map(output::render_html)
    }
}

impl Lane {
    fn flush(&mut self, id: &SurfaceId) {
        while let Some(commands) = self.parked.remove(&self.flushed) {
            for command in commands {
                if let Err(error) = self.surface.execute(command) {
                    warn!(surface = %id, %error, "structural console error");
                }
            }
            self.flushed += 1;
        }
    }
}
