//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for validation and business rules.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AssignRefereeRequest, Assignment, AssignmentListResponse, AutoAssignResponse,
    AvailabilityCheck, AvailabilityCheckQuery, AvailabilityListResponse, AvailabilityQuery,
    AvailabilityRecord, AvailabilityWindow, EligibleQuery, EligibleRefereesResponse, Game,
    GameListResponse, GameStatus, GamesQuery, HealthResponse, NewGame, NewReferee, Referee,
    RefereeListResponse, RefereeUpdate,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services;
use crate::models::{AssignmentId, AvailabilityId, GameId, GameTimeRange, RefereeId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a resource.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and storage is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Referees
// =============================================================================

/// GET /v1/referees
pub async fn list_referees(State(state): State<AppState>) -> HandlerResult<RefereeListResponse> {
    let referees = services::list_referees(state.repository.as_ref()).await?;
    let total = referees.len();
    Ok(Json(RefereeListResponse { referees, total }))
}

/// POST /v1/referees
pub async fn create_referee(
    State(state): State<AppState>,
    Json(request): Json<NewReferee>,
) -> CreatedResult<Referee> {
    let referee = services::create_referee(state.repository.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(referee)))
}

/// GET /v1/referees/{referee_id}
pub async fn get_referee(
    State(state): State<AppState>,
    Path(referee_id): Path<i64>,
) -> HandlerResult<Referee> {
    let referee = services::get_referee(state.repository.as_ref(), RefereeId::new(referee_id)).await?;
    Ok(Json(referee))
}

/// PATCH /v1/referees/{referee_id}
///
/// Partial update; typically used to flip the global availability flag.
pub async fn update_referee(
    State(state): State<AppState>,
    Path(referee_id): Path<i64>,
    Json(update): Json<RefereeUpdate>,
) -> HandlerResult<Referee> {
    let referee =
        services::update_referee(state.repository.as_ref(), RefereeId::new(referee_id), &update)
            .await?;
    Ok(Json(referee))
}

// =============================================================================
// Availability
// =============================================================================

/// GET /v1/referees/{referee_id}/availability?date=YYYY-MM-DD
pub async fn list_availability(
    State(state): State<AppState>,
    Path(referee_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> HandlerResult<AvailabilityListResponse> {
    let availability = services::list_availability(
        state.repository.as_ref(),
        RefereeId::new(referee_id),
        query.date.as_deref(),
    )
    .await?;
    let total = availability.len();

    Ok(Json(AvailabilityListResponse {
        referee_id,
        availability,
        total,
    }))
}

/// POST /v1/referees/{referee_id}/availability
pub async fn add_availability(
    State(state): State<AppState>,
    Path(referee_id): Path<i64>,
    Json(window): Json<AvailabilityWindow>,
) -> CreatedResult<AvailabilityRecord> {
    let record =
        services::add_availability(state.repository.as_ref(), RefereeId::new(referee_id), &window)
            .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /v1/referees/{referee_id}/availability/{availability_id}
pub async fn delete_availability(
    State(state): State<AppState>,
    Path((referee_id, availability_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    services::delete_availability(
        state.repository.as_ref(),
        RefereeId::new(referee_id),
        AvailabilityId::new(availability_id),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/referees/{referee_id}/availability/check?date=&start=&end=
///
/// Score one referee against a slot and report any conflicting window.
pub async fn check_availability(
    State(state): State<AppState>,
    Path(referee_id): Path<i64>,
    Query(query): Query<AvailabilityCheckQuery>,
) -> HandlerResult<AvailabilityCheck> {
    let game_time = GameTimeRange::new(query.start, query.end);
    let check = services::check_referee_availability(
        state.repository.as_ref(),
        RefereeId::new(referee_id),
        &query.date,
        &game_time,
    )
    .await?;
    Ok(Json(check))
}

// =============================================================================
// Games
// =============================================================================

/// GET /v1/games?status=
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GamesQuery>,
) -> HandlerResult<GameListResponse> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<GameStatus>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let games = services::list_games(state.repository.as_ref(), status).await?;
    let total = games.len();
    Ok(Json(GameListResponse { games, total }))
}

/// POST /v1/games
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<NewGame>,
) -> CreatedResult<Game> {
    let game = services::create_game(state.repository.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// GET /v1/games/{game_id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> HandlerResult<Game> {
    let game = services::get_game(state.repository.as_ref(), GameId::new(game_id)).await?;
    Ok(Json(game))
}

/// POST /v1/games/{game_id}/cancel
pub async fn cancel_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> HandlerResult<Game> {
    let game = services::cancel_game(state.repository.as_ref(), GameId::new(game_id)).await?;
    Ok(Json(game))
}

/// GET /v1/games/{game_id}/eligible-referees?ranked=bool
pub async fn eligible_referees(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
    Query(query): Query<EligibleQuery>,
) -> HandlerResult<EligibleRefereesResponse> {
    let ranked = query.ranked.unwrap_or(false);
    let referees =
        services::eligible_referees_for_game(state.repository.as_ref(), GameId::new(game_id), ranked)
            .await?;
    let total = referees.len();

    Ok(Json(EligibleRefereesResponse {
        game_id,
        ranked,
        referees,
        total,
    }))
}

// =============================================================================
// Assignments
// =============================================================================

/// GET /v1/games/{game_id}/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> HandlerResult<AssignmentListResponse> {
    let assignments =
        services::list_assignments_for_game(state.repository.as_ref(), GameId::new(game_id))
            .await?;
    let total = assignments.len();

    Ok(Json(AssignmentListResponse {
        game_id,
        assignments,
        total,
    }))
}

/// POST /v1/games/{game_id}/assignments
pub async fn assign_referee(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
    Json(request): Json<AssignRefereeRequest>,
) -> CreatedResult<Assignment> {
    let assignment = services::assign_referee(
        state.repository.as_ref(),
        GameId::new(game_id),
        RefereeId::new(request.referee_id),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// POST /v1/games/{game_id}/auto-assign
///
/// Fill open slots from the ranked eligible list. Returns the game after
/// staffing along with the assignments created by this call.
pub async fn auto_assign(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> HandlerResult<AutoAssignResponse> {
    let game_id = GameId::new(game_id);
    let assignments = services::auto_assign(state.repository.as_ref(), game_id).await?;
    let game = services::get_game(state.repository.as_ref(), game_id).await?;
    Ok(Json(AutoAssignResponse { game, assignments }))
}

/// DELETE /v1/assignments/{assignment_id}
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(assignment_id): Path<i64>,
) -> HandlerResult<Assignment> {
    let removed =
        services::unassign(state.repository.as_ref(), AssignmentId::new(assignment_id)).await?;
    Ok(Json(removed))
}
