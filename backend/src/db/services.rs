//! High-level service layer.
//!
//! Repository-agnostic operations that work with any implementation of the
//! repository traits. This is where request-shape validation happens, where
//! persisted referees and windows are shaped into evaluator candidates, and
//! where assignment decisions are checked and written back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers (http/)                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Input validation                                     │
//! │  - Candidate shaping + eligibility evaluation           │
//! │  - Staffing and double-booking checks                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼────────────────┐
//!     │ Local Repository (in-memory)   │
//!     └────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use referee_backend::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let referees = services::list_referees(&repo).await?;
//!     println!("Found {} referees", referees.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info, warn};
use std::collections::HashMap;

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::algorithms::availability::{
    filter_eligible_referees, has_conflict, intervals_overlap, rank_eligible_referees,
    score_availability, validate_window,
};
use crate::models::{
    is_calendar_date, Assignment, AssignmentId, AvailabilityCheck, AvailabilityId,
    AvailabilityRecord, AvailabilityWindow, EligibleReferee, Game, GameId, GameStatus,
    GameTimeRange, NewGame, NewReferee, Referee, RefereeCandidate, RefereeId, RefereeUpdate,
};

// ==================== Health & Connection ====================

/// Check if the storage backend is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Validation helpers ====================

fn require_non_blank(value: &str, field: &str, operation: &str) -> RepositoryResult<()> {
    if value.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            format!("'{}' must not be empty", field),
            ErrorContext::new(operation).with_details(format!("field={}", field)),
        ));
    }
    Ok(())
}

/// Validate a dated time range using the same rules as availability windows,
/// plus a real calendar date.
fn validate_dated_range(
    date: &str,
    start_time: &str,
    end_time: &str,
    operation: &str,
) -> RepositoryResult<()> {
    let probe = AvailabilityWindow::available(date, start_time, end_time);
    if !validate_window(&probe) {
        return Err(RepositoryError::validation_with_context(
            format!(
                "Invalid time range '{}'-'{}' on '{}': times must be HH:MM with start before end",
                start_time, end_time, date
            ),
            ErrorContext::new(operation),
        ));
    }
    if !is_calendar_date(date) {
        return Err(RepositoryError::validation_with_context(
            format!("Invalid date '{}': expected YYYY-MM-DD", date),
            ErrorContext::new(operation),
        ));
    }
    Ok(())
}

// ==================== Referee Operations ====================

/// Register a referee. The name must not be blank.
pub async fn create_referee<R: FullRepository + ?Sized>(
    repo: &R,
    referee: &NewReferee,
) -> RepositoryResult<Referee> {
    require_non_blank(&referee.name, "name", "create_referee")?;
    let stored = repo.create_referee(referee).await?;
    info!(
        "Service layer: registered referee {} '{}' (available={})",
        stored.id, stored.name, stored.is_available
    );
    Ok(stored)
}

pub async fn get_referee<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
) -> RepositoryResult<Referee> {
    repo.get_referee(referee_id).await
}

pub async fn list_referees<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Referee>> {
    repo.list_referees().await
}

/// Apply a partial update. A supplied name must not be blank.
pub async fn update_referee<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
    update: &RefereeUpdate,
) -> RepositoryResult<Referee> {
    if let Some(name) = &update.name {
        require_non_blank(name, "name", "update_referee")?;
    }
    let updated = repo.update_referee(referee_id, update).await?;
    info!(
        "Service layer: updated referee {} (available={})",
        updated.id, updated.is_available
    );
    Ok(updated)
}

// ==================== Availability Operations ====================

/// Store an availability window after validating it.
///
/// Rejected with a validation error when the window fails
/// [`validate_window`] or the date is not a real `YYYY-MM-DD` date.
pub async fn add_availability<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
    window: &AvailabilityWindow,
) -> RepositoryResult<AvailabilityRecord> {
    validate_dated_range(
        &window.date,
        &window.start_time,
        &window.end_time,
        "add_availability",
    )?;

    let record = repo.add_availability(referee_id, window).await?;
    debug!(
        "Service layer: referee {} marked {} {}-{} as {}",
        referee_id,
        window.date,
        window.start_time,
        window.end_time,
        if window.is_available { "available" } else { "unavailable" }
    );
    Ok(record)
}

pub async fn list_availability<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
    date: Option<&str>,
) -> RepositoryResult<Vec<AvailabilityRecord>> {
    repo.list_availability(referee_id, date).await
}

pub async fn delete_availability<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
    availability_id: AvailabilityId,
) -> RepositoryResult<()> {
    repo.delete_availability(referee_id, availability_id).await?;
    debug!(
        "Service layer: removed availability window {} of referee {}",
        availability_id, referee_id
    );
    Ok(())
}

/// Score one referee against a time slot on a date and report any conflict.
pub async fn check_referee_availability<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
    date: &str,
    game_time: &GameTimeRange,
) -> RepositoryResult<AvailabilityCheck> {
    validate_dated_range(
        date,
        &game_time.start,
        &game_time.end,
        "check_referee_availability",
    )?;
    let referee = repo.get_referee(referee_id).await?;
    let windows = repo.list_availability(referee_id, Some(date)).await?;
    let candidate = referee.to_candidate(&windows);

    Ok(AvailabilityCheck {
        availability_score: score_availability(&candidate, game_time),
        has_conflict: has_conflict(&candidate.availability, game_time),
    })
}

// ==================== Game Operations ====================

/// Schedule a game. Starts out [`GameStatus::Unassigned`].
pub async fn create_game<R: FullRepository + ?Sized>(
    repo: &R,
    game: &NewGame,
) -> RepositoryResult<Game> {
    validate_dated_range(&game.date, &game.start_time, &game.end_time, "create_game")?;
    require_non_blank(&game.home_team, "home_team", "create_game")?;
    require_non_blank(&game.away_team, "away_team", "create_game")?;
    if game.referees_required == 0 {
        return Err(RepositoryError::validation_with_context(
            "'referees_required' must be at least 1",
            ErrorContext::new("create_game"),
        ));
    }

    let stored = repo.create_game(game).await?;
    info!(
        "Service layer: scheduled game {} {} vs {} on {} {}-{} ({} referees)",
        stored.id,
        stored.home_team,
        stored.away_team,
        stored.date,
        stored.start_time,
        stored.end_time,
        stored.referees_required
    );
    Ok(stored)
}

pub async fn get_game<R: FullRepository + ?Sized>(repo: &R, game_id: GameId) -> RepositoryResult<Game> {
    repo.get_game(game_id).await
}

pub async fn list_games<R: FullRepository + ?Sized>(
    repo: &R,
    status: Option<GameStatus>,
) -> RepositoryResult<Vec<Game>> {
    repo.list_games(status).await
}

/// Cancel a game. Existing assignments are kept as a record.
pub async fn cancel_game<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
) -> RepositoryResult<Game> {
    let game = repo.set_game_status(game_id, GameStatus::Cancelled).await?;
    info!("Service layer: cancelled game {}", game_id);
    Ok(game)
}

// ==================== Eligibility ====================

/// Shape every referee into a candidate carrying only their windows on `date`.
///
/// Referees come out in ID order; each referee's windows keep insertion order.
pub async fn build_candidates<R: FullRepository + ?Sized>(
    repo: &R,
    date: &str,
) -> RepositoryResult<Vec<RefereeCandidate>> {
    let referees = repo.list_referees().await?;
    let windows = repo.list_availability_on(date).await?;

    let mut by_referee: HashMap<RefereeId, Vec<&AvailabilityRecord>> = HashMap::new();
    for record in &windows {
        by_referee.entry(record.referee_id).or_default().push(record);
    }

    Ok(referees
        .iter()
        .map(|referee| {
            let own = by_referee.get(&referee.id).map(Vec::as_slice).unwrap_or(&[]);
            referee.to_candidate(own.iter().copied())
        })
        .collect())
}

/// Referees who may be offered a game, excluding those already booked on it.
///
/// With `ranked` the list is ordered by descending score (stable); otherwise
/// it follows referee ID order.
pub async fn eligible_referees_for_game<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
    ranked: bool,
) -> RepositoryResult<Vec<EligibleReferee>> {
    let game = repo.get_game(game_id).await?;
    let candidates = build_candidates(repo, &game.date).await?;
    let game_time = game.time_range();

    let eligible = if ranked {
        rank_eligible_referees(&candidates, &game_time)
    } else {
        filter_eligible_referees(&candidates, &game_time)
    };

    let booked: Vec<RefereeId> = repo
        .list_assignments_for_game(game_id)
        .await?
        .into_iter()
        .map(|a| a.referee_id)
        .collect();

    let eligible: Vec<EligibleReferee> = eligible
        .into_iter()
        .filter(|e| !booked.contains(&e.referee.id))
        .collect();

    debug!(
        "Service layer: {} of {} referees eligible for game {}",
        eligible.len(),
        candidates.len(),
        game_id
    );
    Ok(eligible)
}

// ==================== Assignment Operations ====================

/// Find another active game on the same date whose time overlaps `game`
/// and that the referee is already booked on.
async fn find_double_booking<R: FullRepository + ?Sized>(
    repo: &R,
    referee_id: RefereeId,
    game: &Game,
) -> RepositoryResult<Option<GameId>> {
    for assignment in repo.list_assignments_for_referee(referee_id).await? {
        if assignment.game_id == game.id {
            continue;
        }
        let other = repo.get_game(assignment.game_id).await?;
        if other.status == GameStatus::Cancelled || other.date != game.date {
            continue;
        }
        if intervals_overlap(&other, game) {
            return Ok(Some(other.id));
        }
    }
    Ok(None)
}

fn assignment_conflict(game_id: GameId, referee_id: RefereeId, message: String) -> RepositoryError {
    RepositoryError::conflict_with_context(
        message,
        ErrorContext::new("assign_referee")
            .with_entity("game")
            .with_entity_id(game_id)
            .with_details(format!("referee_id={}", referee_id)),
    )
}

/// Explain why a referee did not pass the eligibility filter.
fn ineligibility_reason(candidate: &RefereeCandidate, game_time: &GameTimeRange) -> &'static str {
    if !candidate.is_available {
        "referee is marked unavailable"
    } else if has_conflict(&candidate.availability, game_time) {
        "an unavailable window overlaps the game time"
    } else {
        "no available window covers the game time"
    }
}

/// Write an assignment. The repository refuses the row atomically if the
/// game filled up, or the referee was double booked, since the checks ran.
async fn book<R: FullRepository + ?Sized>(
    repo: &R,
    game: &Game,
    referee_id: RefereeId,
) -> RepositoryResult<Assignment> {
    let assignment = repo.create_assignment(game.id, referee_id).await?;
    let staffed = repo.get_game(game.id).await?;
    info!(
        "Service layer: assigned referee {} to game {} (status={})",
        referee_id, game.id, staffed.status
    );
    Ok(assignment)
}

/// Assign a referee to a game.
///
/// # Errors
/// * `NotFound` - game or referee does not exist
/// * `Conflict` - game cancelled or fully staffed, referee already on this
///   game, referee not eligible for the slot, or referee booked on an
///   overlapping game the same day
pub async fn assign_referee<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
    referee_id: RefereeId,
) -> RepositoryResult<Assignment> {
    let game = repo.get_game(game_id).await?;
    let referee = repo.get_referee(referee_id).await?;

    if game.status == GameStatus::Cancelled {
        return Err(assignment_conflict(
            game_id,
            referee_id,
            format!("Game {} is cancelled", game_id),
        ));
    }

    let existing = repo.list_assignments_for_game(game_id).await?;
    if existing.iter().any(|a| a.referee_id == referee_id) {
        return Err(assignment_conflict(
            game_id,
            referee_id,
            format!("Referee {} is already assigned to game {}", referee_id, game_id),
        ));
    }
    if existing.len() >= game.referees_required as usize {
        return Err(assignment_conflict(
            game_id,
            referee_id,
            format!("Game {} is fully staffed", game_id),
        ));
    }

    let windows = repo.list_availability(referee_id, Some(&game.date)).await?;
    let candidate = referee.to_candidate(&windows);
    let game_time = game.time_range();
    if filter_eligible_referees(std::slice::from_ref(&candidate), &game_time).is_empty() {
        let reason = ineligibility_reason(&candidate, &game_time);
        warn!(
            "Service layer: rejected referee {} for game {}: {}",
            referee_id, game_id, reason
        );
        return Err(assignment_conflict(
            game_id,
            referee_id,
            format!("Referee {} is not eligible: {}", referee_id, reason),
        ));
    }

    if let Some(other) = find_double_booking(repo, referee_id, &game).await? {
        return Err(assignment_conflict(
            game_id,
            referee_id,
            format!(
                "Referee {} is already booked on overlapping game {}",
                referee_id, other
            ),
        ));
    }

    book(repo, &game, referee_id).await
}

/// Fill a game's open slots from its ranked eligible referees.
///
/// Referees booked on an overlapping game the same day are skipped. Returns
/// the new assignments, which may be fewer than the open slots (or none).
pub async fn auto_assign<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
) -> RepositoryResult<Vec<Assignment>> {
    let mut game = repo.get_game(game_id).await?;
    if game.status == GameStatus::Cancelled {
        return Err(RepositoryError::conflict_with_context(
            format!("Game {} is cancelled", game_id),
            ErrorContext::new("auto_assign")
                .with_entity("game")
                .with_entity_id(game_id),
        ));
    }

    let assigned = repo.list_assignments_for_game(game_id).await?.len();
    let mut open = (game.referees_required as usize).saturating_sub(assigned);
    let mut created = Vec::new();
    if open == 0 {
        debug!("Service layer: game {} already fully staffed", game_id);
        return Ok(created);
    }

    for eligible in eligible_referees_for_game(repo, game_id, true).await? {
        if open == 0 {
            break;
        }
        let referee_id = eligible.referee.id;
        if find_double_booking(repo, referee_id, &game).await?.is_some() {
            debug!(
                "Service layer: skipping referee {} for game {}: double booked",
                referee_id, game_id
            );
            continue;
        }
        match book(repo, &game, referee_id).await {
            Ok(assignment) => created.push(assignment),
            Err(RepositoryError::Conflict { message, .. }) => {
                debug!(
                    "Service layer: skipping referee {} for game {}: {}",
                    referee_id, game_id, message
                );
                continue;
            }
            Err(e) => return Err(e),
        }
        game = repo.get_game(game_id).await?;
        open -= 1;
    }

    if open > 0 {
        warn!(
            "Service layer: game {} still has {} open slot(s) after auto-assign",
            game_id, open
        );
    }
    Ok(created)
}

pub async fn list_assignments_for_game<R: FullRepository + ?Sized>(
    repo: &R,
    game_id: GameId,
) -> RepositoryResult<Vec<Assignment>> {
    repo.get_game(game_id).await?;
    repo.list_assignments_for_game(game_id).await
}

/// Remove an assignment. The repository brings the game's status back in line.
pub async fn unassign<R: FullRepository + ?Sized>(
    repo: &R,
    assignment_id: AssignmentId,
) -> RepositoryResult<Assignment> {
    let removed = repo.delete_assignment(assignment_id).await?;
    let game = repo.get_game(removed.game_id).await?;
    info!(
        "Service layer: removed assignment {} (referee {} from game {}, status={})",
        assignment_id, removed.referee_id, removed.game_id, game.status
    );
    Ok(removed)
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
