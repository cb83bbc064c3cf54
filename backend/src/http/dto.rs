//! Data Transfer Objects for the HTTP API.
//!
//! Stored records and evaluator outputs already derive Serialize/Deserialize
//! and are returned as-is; this module adds the list envelopes, query
//! parameters and request bodies specific to the REST surface.

use serde::{Deserialize, Serialize};

pub use crate::models::{
    Assignment, AvailabilityCheck, AvailabilityRecord, AvailabilityWindow, EligibleReferee, Game,
    GameStatus, NewGame, NewReferee, Referee, RefereeUpdate,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}

/// Referee list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefereeListResponse {
    pub referees: Vec<Referee>,
    pub total: usize,
}

/// Availability window list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityListResponse {
    pub referee_id: i64,
    pub availability: Vec<AvailabilityRecord>,
    pub total: usize,
}

/// Game list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameListResponse {
    pub games: Vec<Game>,
    pub total: usize,
}

/// Eligible referees for one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibleRefereesResponse {
    pub game_id: i64,
    pub ranked: bool,
    pub referees: Vec<EligibleReferee>,
    pub total: usize,
}

/// Assignment list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentListResponse {
    pub game_id: i64,
    pub assignments: Vec<Assignment>,
    pub total: usize,
}

/// Result of an auto-assign run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoAssignResponse {
    pub game: Game,
    pub assignments: Vec<Assignment>,
}

/// Request body for assigning a referee to a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRefereeRequest {
    pub referee_id: i64,
}

/// Query parameters for listing availability.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AvailabilityQuery {
    /// Restrict to one date (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: Option<String>,
}

/// Query parameters for checking one referee against a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityCheckQuery {
    pub date: String,
    pub start: String,
    pub end: String,
}

/// Query parameters for listing games.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GamesQuery {
    /// Filter by status (`unassigned`, `partially_assigned`, `assigned`, `cancelled`)
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for the eligible-referees endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EligibleQuery {
    /// Order by descending score instead of referee order (default: false)
    #[serde(default)]
    pub ranked: Option<bool>,
}
