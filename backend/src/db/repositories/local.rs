//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. Records live in ordered
//! maps keyed by ID, so listings are deterministic and follow insertion order.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::algorithms::intervals_overlap;
use crate::db::repository::{
    AssignmentRepository, ErrorContext, GameRepository, RefereeRepository, RepositoryError,
    RepositoryResult,
};
use crate::models::{
    Assignment, AssignmentId, AvailabilityId, AvailabilityRecord, AvailabilityWindow, Game,
    GameId, GameStatus, NewGame, NewReferee, Referee, RefereeId, RefereeUpdate,
};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same underlying data.
///
/// # Example
/// ```
/// use referee_backend::db::repositories::LocalRepository;
/// use referee_backend::db::repository::RefereeRepository;
/// use referee_backend::models::NewReferee;
///
/// # tokio_test_block_on(async {
/// let repo = LocalRepository::new();
/// let referee = repo
///     .create_referee(&NewReferee { name: "Jo".into(), email: None, is_available: true })
///     .await
///     .unwrap();
/// assert_eq!(referee.id.value(), 1);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    referees: BTreeMap<RefereeId, Referee>,
    availability: BTreeMap<AvailabilityId, AvailabilityRecord>,
    games: BTreeMap<GameId, Game>,
    assignments: BTreeMap<AssignmentId, Assignment>,

    // ID counters
    next_referee_id: i64,
    next_availability_id: i64,
    next_game_id: i64,
    next_assignment_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            referees: BTreeMap::new(),
            availability: BTreeMap::new(),
            games: BTreeMap::new(),
            assignments: BTreeMap::new(),
            next_referee_id: 1,
            next_availability_id: 1,
            next_game_id: 1,
            next_assignment_id: 1,
            is_healthy: true,
        }
    }
}

fn take_id(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of referees stored.
    pub fn referee_count(&self) -> usize {
        self.data.read().referees.len()
    }

    /// Get the number of games stored.
    pub fn game_count(&self) -> usize {
        self.data.read().games.len()
    }

    /// Get the number of assignments stored.
    pub fn assignment_count(&self) -> usize {
        self.data.read().assignments.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn referee_not_found(operation: &str, referee_id: RefereeId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Referee {} not found", referee_id),
        ErrorContext::new(operation)
            .with_entity("referee")
            .with_entity_id(referee_id),
    )
}

fn game_not_found(operation: &str, game_id: GameId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Game {} not found", game_id),
        ErrorContext::new(operation)
            .with_entity("game")
            .with_entity_id(game_id),
    )
}

fn assignment_not_found(operation: &str, assignment_id: AssignmentId) -> RepositoryError {
    RepositoryError::not_found_with_context(
        format!("Assignment {} not found", assignment_id),
        ErrorContext::new(operation)
            .with_entity("assignment")
            .with_entity_id(assignment_id),
    )
}

/// Why `referee_id` may not be booked on `game`, checked against the
/// current rows.
fn booking_refusal(data: &LocalData, game: &Game, referee_id: RefereeId) -> Option<String> {
    if game.status == GameStatus::Cancelled {
        return Some(format!("Game {} is cancelled", game.id));
    }
    let booked: Vec<&Assignment> = data
        .assignments
        .values()
        .filter(|a| a.game_id == game.id)
        .collect();
    if booked.iter().any(|a| a.referee_id == referee_id) {
        return Some(format!(
            "Referee {} is already assigned to game {}",
            referee_id, game.id
        ));
    }
    if booked.len() >= game.referees_required as usize {
        return Some(format!("Game {} is fully staffed", game.id));
    }
    data.assignments
        .values()
        .filter(|a| a.referee_id == referee_id && a.game_id != game.id)
        .filter_map(|a| data.games.get(&a.game_id))
        .find(|other| {
            other.status != GameStatus::Cancelled
                && other.date == game.date
                && intervals_overlap(*other, game)
        })
        .map(|other| {
            format!(
                "Referee {} is already booked on overlapping game {}",
                referee_id, other.id
            )
        })
}

/// Bring a game's status in line with its current bookings.
fn restaff(data: &mut LocalData, game_id: GameId) {
    let assigned = data
        .assignments
        .values()
        .filter(|a| a.game_id == game_id)
        .count();
    if let Some(game) = data.games.get_mut(&game_id) {
        game.status = GameStatus::for_staffing(game.status, assigned, game.referees_required);
    }
}

#[async_trait]
impl RefereeRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create_referee(&self, referee: &NewReferee) -> RepositoryResult<Referee> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = RefereeId::new(take_id(&mut data.next_referee_id));
        let stored = Referee {
            id,
            name: referee.name.clone(),
            email: referee.email.clone(),
            is_available: referee.is_available,
        };
        data.referees.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_referee(&self, referee_id: RefereeId) -> RepositoryResult<Referee> {
        self.check_health()?;
        self.data
            .read()
            .referees
            .get(&referee_id)
            .cloned()
            .ok_or_else(|| referee_not_found("get_referee", referee_id))
    }

    async fn list_referees(&self) -> RepositoryResult<Vec<Referee>> {
        self.check_health()?;
        Ok(self.data.read().referees.values().cloned().collect())
    }

    async fn update_referee(
        &self,
        referee_id: RefereeId,
        update: &RefereeUpdate,
    ) -> RepositoryResult<Referee> {
        self.check_health()?;
        let mut data = self.data.write();
        let referee = data
            .referees
            .get_mut(&referee_id)
            .ok_or_else(|| referee_not_found("update_referee", referee_id))?;
        update.apply_to(referee);
        Ok(referee.clone())
    }

    async fn add_availability(
        &self,
        referee_id: RefereeId,
        window: &AvailabilityWindow,
    ) -> RepositoryResult<AvailabilityRecord> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.referees.contains_key(&referee_id) {
            return Err(referee_not_found("add_availability", referee_id));
        }
        let id = AvailabilityId::new(take_id(&mut data.next_availability_id));
        let record = AvailabilityRecord {
            id,
            referee_id,
            window: window.clone(),
        };
        data.availability.insert(id, record.clone());
        Ok(record)
    }

    async fn list_availability(
        &self,
        referee_id: RefereeId,
        date: Option<&str>,
    ) -> RepositoryResult<Vec<AvailabilityRecord>> {
        self.check_health()?;
        let data = self.data.read();
        if !data.referees.contains_key(&referee_id) {
            return Err(referee_not_found("list_availability", referee_id));
        }
        Ok(data
            .availability
            .values()
            .filter(|r| r.referee_id == referee_id)
            .filter(|r| date.map_or(true, |d| r.window.date == d))
            .cloned()
            .collect())
    }

    async fn list_availability_on(&self, date: &str) -> RepositoryResult<Vec<AvailabilityRecord>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .availability
            .values()
            .filter(|r| r.window.date == date)
            .cloned()
            .collect())
    }

    async fn delete_availability(
        &self,
        referee_id: RefereeId,
        availability_id: AvailabilityId,
    ) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        let owned = data
            .availability
            .get(&availability_id)
            .is_some_and(|record| record.referee_id == referee_id);
        if !owned {
            return Err(RepositoryError::not_found_with_context(
                format!(
                    "Availability window {} not found for referee {}",
                    availability_id, referee_id
                ),
                ErrorContext::new("delete_availability")
                    .with_entity("availability")
                    .with_entity_id(availability_id),
            ));
        }
        data.availability.remove(&availability_id);
        Ok(())
    }
}

#[async_trait]
impl GameRepository for LocalRepository {
    async fn create_game(&self, game: &NewGame) -> RepositoryResult<Game> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = GameId::new(take_id(&mut data.next_game_id));
        let stored = Game {
            id,
            date: game.date.clone(),
            start_time: game.start_time.clone(),
            end_time: game.end_time.clone(),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
            location: game.location.clone(),
            referees_required: game.referees_required,
            status: GameStatus::Unassigned,
        };
        data.games.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_game(&self, game_id: GameId) -> RepositoryResult<Game> {
        self.check_health()?;
        self.data
            .read()
            .games
            .get(&game_id)
            .cloned()
            .ok_or_else(|| game_not_found("get_game", game_id))
    }

    async fn list_games(&self, status: Option<GameStatus>) -> RepositoryResult<Vec<Game>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .games
            .values()
            .filter(|g| status.map_or(true, |s| g.status == s))
            .cloned()
            .collect())
    }

    async fn set_game_status(&self, game_id: GameId, status: GameStatus) -> RepositoryResult<Game> {
        self.check_health()?;
        let mut data = self.data.write();
        let game = data
            .games
            .get_mut(&game_id)
            .ok_or_else(|| game_not_found("set_game_status", game_id))?;
        game.status = status;
        Ok(game.clone())
    }
}

#[async_trait]
impl AssignmentRepository for LocalRepository {
    async fn create_assignment(
        &self,
        game_id: GameId,
        referee_id: RefereeId,
    ) -> RepositoryResult<Assignment> {
        self.check_health()?;
        let mut data = self.data.write();
        let game = data
            .games
            .get(&game_id)
            .cloned()
            .ok_or_else(|| game_not_found("create_assignment", game_id))?;
        if !data.referees.contains_key(&referee_id) {
            return Err(referee_not_found("create_assignment", referee_id));
        }
        if let Some(message) = booking_refusal(&data, &game, referee_id) {
            return Err(RepositoryError::conflict_with_context(
                message,
                ErrorContext::new("create_assignment")
                    .with_entity("game")
                    .with_entity_id(game_id)
                    .with_details(format!("referee_id={}", referee_id)),
            ));
        }

        let id = AssignmentId::new(take_id(&mut data.next_assignment_id));
        let assignment = Assignment {
            id,
            game_id,
            referee_id,
            assigned_at: Utc::now(),
        };
        data.assignments.insert(id, assignment.clone());
        restaff(&mut data, game_id);
        Ok(assignment)
    }

    async fn get_assignment(&self, assignment_id: AssignmentId) -> RepositoryResult<Assignment> {
        self.check_health()?;
        self.data
            .read()
            .assignments
            .get(&assignment_id)
            .cloned()
            .ok_or_else(|| assignment_not_found("get_assignment", assignment_id))
    }

    async fn list_assignments_for_game(
        &self,
        game_id: GameId,
    ) -> RepositoryResult<Vec<Assignment>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .assignments
            .values()
            .filter(|a| a.game_id == game_id)
            .cloned()
            .collect())
    }

    async fn list_assignments_for_referee(
        &self,
        referee_id: RefereeId,
    ) -> RepositoryResult<Vec<Assignment>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .assignments
            .values()
            .filter(|a| a.referee_id == referee_id)
            .cloned()
            .collect())
    }

    async fn delete_assignment(&self, assignment_id: AssignmentId) -> RepositoryResult<Assignment> {
        self.check_health()?;
        let mut data = self.data.write();
        let removed = data
            .assignments
            .remove(&assignment_id)
            .ok_or_else(|| assignment_not_found("delete_assignment", assignment_id))?;
        restaff(&mut data, removed.game_id);
        Ok(removed)
    }
}
