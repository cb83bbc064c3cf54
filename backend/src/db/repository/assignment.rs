//! Assignment repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Assignment, AssignmentId, GameId, RefereeId};

/// Storage operations for referee-to-game bookings.
///
/// Eligibility against availability windows belongs to the service layer.
/// Booking rules that depend on other rows are enforced here, so they hold
/// under concurrent requests.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Book a referee on a game and update the game's status.
    ///
    /// The checks, the insert and the status update must happen as one
    /// atomic step with respect to other assignment writes.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the game or referee doesn't exist
    /// * `Err(RepositoryError::Conflict)` - If the game is cancelled or fully
    ///   staffed, the referee is already on it, or the referee holds an
    ///   overlapping booking on an active game the same date
    async fn create_assignment(
        &self,
        game_id: GameId,
        referee_id: RefereeId,
    ) -> RepositoryResult<Assignment>;

    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the assignment doesn't exist
    async fn get_assignment(&self, assignment_id: AssignmentId) -> RepositoryResult<Assignment>;

    /// Assignments for a game, ordered by ID.
    async fn list_assignments_for_game(&self, game_id: GameId)
        -> RepositoryResult<Vec<Assignment>>;

    /// Assignments held by a referee, ordered by ID.
    async fn list_assignments_for_referee(
        &self,
        referee_id: RefereeId,
    ) -> RepositoryResult<Vec<Assignment>>;

    /// Remove an assignment, update the game's status, and return the removed row.
    async fn delete_assignment(&self, assignment_id: AssignmentId) -> RepositoryResult<Assignment>;
}
