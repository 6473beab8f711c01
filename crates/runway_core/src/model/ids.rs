//! Unique identifiers for simulation entities
//!
//! IDs refer to persisted records owned by the caller. The engine never
//! allocates them; it only echoes them back in parameter-update requests.

use serde::{Deserialize, Serialize};

/// Unique identifier for an Event within a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
