use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::availability::{GameTimeRange, TimeSpan};
use super::ids::GameId;

/// Staffing state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Unassigned,
    PartiallyAssigned,
    Assigned,
    Cancelled,
}

impl GameStatus {
    /// Status implied by the number of referees currently booked.
    ///
    /// A cancelled game stays cancelled regardless of bookings.
    pub fn for_staffing(current: GameStatus, assigned: usize, required: u32) -> GameStatus {
        if current == GameStatus::Cancelled {
            return GameStatus::Cancelled;
        }
        match assigned {
            0 => GameStatus::Unassigned,
            n if n >= required as usize => GameStatus::Assigned,
            _ => GameStatus::PartiallyAssigned,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Unassigned => "unassigned",
            GameStatus::PartiallyAssigned => "partially_assigned",
            GameStatus::Assigned => "assigned",
            GameStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unassigned" => Ok(Self::Unassigned),
            "partially_assigned" | "partial" => Ok(Self::PartiallyAssigned),
            "assigned" => Ok(Self::Assigned),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown game status: {}", s)),
        }
    }
}

/// Persisted game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub referees_required: u32,
    pub status: GameStatus,
}

impl Game {
    pub fn time_range(&self) -> GameTimeRange {
        GameTimeRange::new(self.start_time.clone(), self.end_time.clone())
    }
}

impl TimeSpan for Game {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn end_time(&self) -> &str {
        &self.end_time
    }
}

/// Request body for scheduling a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGame {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_referees_required")]
    pub referees_required: u32,
}

fn default_referees_required() -> u32 {
    1
}
