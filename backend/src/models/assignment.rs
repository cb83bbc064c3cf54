use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AssignmentId, GameId, RefereeId};

/// A referee booked to officiate a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub game_id: GameId,
    pub referee_id: RefereeId,
    pub assigned_at: DateTime<Utc>,
}
