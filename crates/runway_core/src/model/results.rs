//! Projection output types
//!
//! A run produces one `Datum` per simulated day plus the batch of parameter
//! corrections the run proved necessary. Query helpers here keep tests and
//! callers out of the raw maps.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::EventId;

/// One day of output: net worth and the balance of every envelope.
///
/// `parts` holds net-worth-counted envelopes (Debt-category balances appear
/// here raw but subtract their absolute value from `value`);
/// `non_networth_parts` holds the excluded tracking envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    /// Day offset from the plan's epoch
    pub date: i64,
    /// Net worth
    pub value: f64,
    pub parts: HashMap<String, f64>,
    #[serde(default)]
    pub non_networth_parts: HashMap<String, f64>,
}

impl Datum {
    /// Balance of an envelope on this day, wherever it was partitioned.
    pub fn balance(&self, name: &str) -> Option<f64> {
        self.parts
            .get(name)
            .or_else(|| self.non_networth_parts.get(name))
            .copied()
    }
}

/// A proposed correction to a persisted event parameter.
///
/// Emitted when simulated state proves the stored value stale, e.g. a loan
/// paid off early shrinks its stored `end_time`. Advisory only: the engine
/// never applies these to its own input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    pub event_id: EventId,
    /// Name of the persisted parameter, e.g. `"end_time"`
    pub parameter: String,
    pub value: f64,
}

impl ParameterUpdate {
    /// Correction shrinking an event's `end_time` to the day it went terminal.
    pub fn end_time(event_id: EventId, day: i64) -> Self {
        Self {
            event_id,
            parameter: "end_time".to_string(),
            value: day as f64,
        }
    }
}

/// A day on which a spendable envelope was overdrawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountWarning {
    pub envelope: String,
    pub date: i64,
    pub balance: f64,
}

/// Complete output of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub data: Vec<Datum>,
    pub parameter_updates: Vec<ParameterUpdate>,
}

impl Projection {
    /// Snapshot for a specific day, if it falls inside the simulated range.
    pub fn datum_on(&self, day: i64) -> Option<&Datum> {
        match self.data.binary_search_by_key(&day, |d| d.date) {
            Ok(i) => Some(&self.data[i]),
            Err(_) => None,
        }
    }

    /// Balance of an envelope on a specific day.
    pub fn balance_on(&self, day: i64, name: &str) -> Option<f64> {
        self.datum_on(day).and_then(|d| d.balance(name))
    }

    /// Balance of an envelope on the last simulated day.
    pub fn final_balance(&self, name: &str) -> Option<f64> {
        self.data.last().and_then(|d| d.balance(name))
    }

    /// Net worth on the last simulated day.
    pub fn final_net_worth(&self) -> Option<f64> {
        self.data.last().map(|d| d.value)
    }

    /// Corrections proposed for one event.
    pub fn updates_for(&self, event_id: EventId) -> impl Iterator<Item = &ParameterUpdate> {
        self.parameter_updates
            .iter()
            .filter(move |u| u.event_id == event_id)
    }
}
