//! Plan documents and the calendar boundary
//!
//! The engine speaks integer day offsets from the subject's birth date. A
//! plan document wraps the persisted plan with the calendar facts needed to
//! translate: the birth date (the epoch) and an optional default date range.
//! YAML and JSON are both accepted, chosen by file extension.

use std::fs;
use std::path::Path;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use runway_core::plan::Plan;

/// A persisted plan plus its calendar framing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDocument {
    /// The epoch: all day offsets count from this date
    pub birth_date: Date,
    /// Default first simulated date; `--from` overrides
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Default last simulated date; `--to` overrides
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(flatten)]
    pub plan: Plan,
}

impl PlanDocument {
    /// Load a document from a `.yaml`, `.yml`, or `.json` file.
    pub fn load(path: &Path) -> Result<Self, PlanFileError> {
        let content = fs::read_to_string(path)
            .map_err(|e| PlanFileError::Io(format!("failed to read {}: {e}", path.display())))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension {
            "yaml" | "yml" => serde_saphyr::from_str(&content)
                .map_err(|e| PlanFileError::Parse(format!("invalid YAML plan: {e}"))),
            "json" => serde_json::from_str(&content)
                .map_err(|e| PlanFileError::Parse(format!("invalid JSON plan: {e}"))),
            other => Err(PlanFileError::UnknownFormat(other.to_string())),
        }
    }

    /// Day offset of a calendar date from the document's epoch.
    pub fn day_offset(&self, date: Date) -> i64 {
        i64::from((date - self.birth_date).get_days())
    }

    /// Calendar date of a day offset, clamped to the calendar's bounds.
    pub fn date_for(&self, day: i64) -> Date {
        match jiff::Span::new().try_days(day) {
            Ok(span) => self.birth_date.saturating_add(span),
            Err(_) if day < 0 => Date::MIN,
            Err(_) => Date::MAX,
        }
    }
}

/// Errors loading a plan document from disk.
#[derive(Debug)]
pub enum PlanFileError {
    Io(String),
    Parse(String),
    UnknownFormat(String),
}

impl std::fmt::Display for PlanFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanFileError::Io(msg) => write!(f, "IO error: {msg}"),
            PlanFileError::Parse(msg) => write!(f, "Parse error: {msg}"),
            PlanFileError::UnknownFormat(ext) => {
                write!(
                    f,
                    "unsupported plan format: .{ext} (expected .yaml, .yml, or .json)"
                )
            }
        }
    }
}

impl std::error::Error for PlanFileError {}
