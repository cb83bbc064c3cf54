//! Fixture loading for local development.
//!
//! A seed file is JSON of the form:
//!
//! ```json
//! {
//!   "referees": [
//!     { "name": "Alex Kim", "is_available": true,
//!       "availability": [ { "date": "2025-01-20", "start_time": "09:00", "end_time": "17:00", "is_available": true } ] }
//!   ],
//!   "games": [
//!     { "date": "2025-01-20", "start_time": "10:00", "end_time": "12:00",
//!       "home_team": "Hawks", "away_team": "Owls" }
//!   ]
//! }
//! ```
//!
//! Records go through the service layer, so the same validation applies as
//! for API requests.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use super::services;
use crate::models::{AvailabilityWindow, NewGame, NewReferee};

/// Referee entry in a seed file, with nested availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReferee {
    #[serde(flatten)]
    pub referee: NewReferee,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
}

/// Top-level seed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub referees: Vec<SeedReferee>,
    #[serde(default)]
    pub games: Vec<NewGame>,
}

/// Counts of what a seed run stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub referees: usize,
    pub windows: usize,
    pub games: usize,
}

impl SeedData {
    /// Parse a seed document from a JSON string.
    pub fn from_json(content: &str) -> RepositoryResult<Self> {
        serde_json::from_str(content).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to parse seed data: {}", e),
                ErrorContext::new("load_seed"),
            )
        })
    }

    /// Read and parse a seed file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Failed to read seed file: {}", e),
                ErrorContext::new("load_seed").with_details(path.display().to_string()),
            )
        })?;
        Self::from_json(&content)
    }
}

/// Store every record of `data` in `repo`.
///
/// Stops at the first record that fails validation; records stored before it
/// are kept.
pub async fn apply_seed<R: FullRepository + ?Sized>(
    repo: &R,
    data: &SeedData,
) -> RepositoryResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &data.referees {
        let referee = services::create_referee(repo, &entry.referee).await?;
        summary.referees += 1;
        for window in &entry.availability {
            services::add_availability(repo, referee.id, window).await?;
            summary.windows += 1;
        }
    }

    for game in &data.games {
        services::create_game(repo, game).await?;
        summary.games += 1;
    }

    info!(
        "Seed loaded: {} referees, {} availability windows, {} games",
        summary.referees, summary.windows, summary.games
    );
    Ok(summary)
}
