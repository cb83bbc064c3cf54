//! Availability records consumed by the eligibility evaluator.
//!
//! These are the flat, caller-supplied shapes: windows a referee has marked
//! on a given date, the time slot of a game, and the per-request candidate
//! record that bundles a referee with their windows.

use serde::{Deserialize, Serialize};

use super::ids::{AvailabilityId, RefereeId};

/// Anything with a `[start, end)` time-of-day interval.
///
/// Times are zero-padded `HH:MM` strings, so plain string ordering is the
/// chronological ordering for well-formed values.
pub trait TimeSpan {
    fn start_time(&self) -> &str;
    fn end_time(&self) -> &str;
}

/// A bare `{start_time, end_time}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start_time: String,
    pub end_time: String,
}

impl TimeInterval {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl TimeSpan for TimeInterval {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

/// One marked time interval for one referee on one date.
///
/// `date`, `start_time` and `end_time` default to empty strings when absent
/// from a payload, so a malformed window still deserializes and is rejected
/// by validation rather than by the JSON extractor. `is_available` has no
/// default: a window that does not say which way it is marked is refused at
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AvailabilityWindow {
    /// Window marked available, with no reason attached.
    pub fn available(
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            is_available: true,
            reason: None,
        }
    }

    /// Window marked unavailable.
    pub fn unavailable(
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            is_available: false,
            reason,
        }
    }
}

impl TimeSpan for AvailabilityWindow {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

/// Start and end of the game slot being matched, on a date supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTimeRange {
    pub start: String,
    pub end: String,
}

impl GameTimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl TimeSpan for GameTimeRange {
    fn start_time(&self) -> &str {
        &self.start
    }

    fn end_time(&self) -> &str {
        &self.end
    }
}

/// Referee shaped for one eligibility request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefereeCandidate {
    pub id: RefereeId,
    pub name: String,
    /// Global on/off flag, independent of any dated window.
    #[serde(rename = "isAvailable")]
    pub is_available: bool,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

/// A candidate that passed the eligibility filter, annotated with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleReferee {
    #[serde(flatten)]
    pub referee: RefereeCandidate,
    #[serde(rename = "availabilityScore")]
    pub availability_score: u32,
}

/// Stored availability window owned by a referee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub id: AvailabilityId,
    pub referee_id: RefereeId,
    #[serde(flatten)]
    pub window: AvailabilityWindow,
}

/// Score and conflict flag for one referee against one game slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityCheck {
    pub availability_score: u32,
    pub has_conflict: bool,
}
