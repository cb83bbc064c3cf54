//! Referee and availability repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    AvailabilityId, AvailabilityRecord, AvailabilityWindow, NewReferee, Referee, RefereeId,
    RefereeUpdate,
};

/// Storage operations for referees and the availability windows they mark.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait RefereeRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the storage backend is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Referee Operations ====================

    /// Store a new referee and return it with its assigned ID.
    async fn create_referee(&self, referee: &NewReferee) -> RepositoryResult<Referee>;

    /// Retrieve a referee by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the referee doesn't exist
    async fn get_referee(&self, referee_id: RefereeId) -> RepositoryResult<Referee>;

    /// List all referees ordered by ID.
    async fn list_referees(&self) -> RepositoryResult<Vec<Referee>>;

    /// Apply a partial update and return the updated referee.
    async fn update_referee(
        &self,
        referee_id: RefereeId,
        update: &RefereeUpdate,
    ) -> RepositoryResult<Referee>;

    // ==================== Availability Operations ====================

    /// Store an availability window for a referee.
    ///
    /// No validation is performed here; callers validate before storing.
    async fn add_availability(
        &self,
        referee_id: RefereeId,
        window: &AvailabilityWindow,
    ) -> RepositoryResult<AvailabilityRecord>;

    /// List a referee's windows in insertion order, optionally restricted to one date.
    async fn list_availability(
        &self,
        referee_id: RefereeId,
        date: Option<&str>,
    ) -> RepositoryResult<Vec<AvailabilityRecord>>;

    /// List every referee's windows on one date, in insertion order.
    async fn list_availability_on(&self, date: &str) -> RepositoryResult<Vec<AvailabilityRecord>>;

    /// Delete a window belonging to a referee.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no such window belongs to the referee
    async fn delete_availability(
        &self,
        referee_id: RefereeId,
        availability_id: AvailabilityId,
    ) -> RepositoryResult<()>;
}
