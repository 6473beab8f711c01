//! Plan container and builder
//!
//! A `Plan` is the persisted input to the engine: envelope definitions plus
//! the flat, ordered event list. Plans deserialize straight from storage; the
//! builder is the programmatic path with automatic event-id assignment.
//!
//! # Example
//!
//! ```
//! use runway_core::model::{EnvelopeDef, EventKind, GrowthModel, InflowParams, Recurrence};
//! use runway_core::plan::Plan;
//!
//! let plan = Plan::builder()
//!     .envelope(EnvelopeDef::new("Checking"))
//!     .envelope(EnvelopeDef::new("Savings").growth(GrowthModel::DailyCompound, 0.04))
//!     .event(EventKind::Inflow(InflowParams {
//!         schedule: Recurrence::every(0, 14.0),
//!         amount: 1200.0,
//!         to_key: "Checking".into(),
//!         updating: Vec::new(),
//!     }))
//!     .build()
//!     .unwrap();
//! assert_eq!(plan.events.len(), 1);
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{EnvelopeDef, Event, EventId, EventKind};

/// Envelope definitions plus the ordered event list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub envelopes: Vec<EnvelopeDef>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Plan {
    /// Construct with uniqueness checks on envelope names and event ids.
    pub fn new(envelopes: Vec<EnvelopeDef>, events: Vec<Event>) -> Result<Self, PlanError> {
        let mut names = HashSet::new();
        for def in &envelopes {
            if !names.insert(def.name.as_str()) {
                return Err(PlanError::DuplicateEnvelope(def.name.clone()));
            }
        }
        let mut ids = HashSet::new();
        for event in &events {
            if !ids.insert(event.id) {
                return Err(PlanError::DuplicateEventId(event.id));
            }
        }
        Ok(Self { envelopes, events })
    }

    pub fn builder() -> PlanBuilder {
        PlanBuilder::new()
    }

    pub fn envelope(&self, name: &str) -> Option<&EnvelopeDef> {
        self.envelopes.iter().find(|e| e.name == name)
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Fluent construction of a `Plan` with sequential event ids.
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    envelopes: Vec<EnvelopeDef>,
    events: Vec<Event>,
    next_event_id: u32,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn envelope(mut self, def: EnvelopeDef) -> Self {
        self.envelopes.push(def);
        self
    }

    #[must_use]
    pub fn envelopes(mut self, defs: impl IntoIterator<Item = EnvelopeDef>) -> Self {
        self.envelopes.extend(defs);
        self
    }

    /// Add an event with the next sequential id.
    #[must_use]
    pub fn event(mut self, kind: EventKind) -> Self {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        self.events.push(Event::new(id, kind));
        self
    }

    /// Add an event under a caller-chosen id (e.g. a persisted one).
    #[must_use]
    pub fn event_with_id(mut self, id: EventId, kind: EventKind) -> Self {
        self.next_event_id = self.next_event_id.max(id.0 + 1);
        self.events.push(Event::new(id, kind));
        self
    }

    pub fn build(self) -> Result<Plan, PlanError> {
        Plan::new(self.envelopes, self.events)
    }
}

/// Errors constructing a plan. These guard the programmatic path only;
/// deserialized plans are checked by `validate` instead, which never blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    DuplicateEnvelope(String),
    DuplicateEventId(EventId),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::DuplicateEnvelope(name) => {
                write!(f, "duplicate envelope name: {name}")
            }
            PlanError::DuplicateEventId(id) => {
                write!(f, "duplicate event id: {id}")
            }
        }
    }
}

impl std::error::Error for PlanError {}
