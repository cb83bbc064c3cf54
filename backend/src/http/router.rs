//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Default JSON body limit.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_BODY_LIMIT)
}

/// Same as [`create_router`] with an explicit request body limit.
pub fn create_router_with_limit(state: AppState, body_limit: usize) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Referees
        .route(
            "/referees",
            get(handlers::list_referees).post(handlers::create_referee),
        )
        .route(
            "/referees/{referee_id}",
            get(handlers::get_referee).patch(handlers::update_referee),
        )
        // Availability windows
        .route(
            "/referees/{referee_id}/availability",
            get(handlers::list_availability).post(handlers::add_availability),
        )
        .route(
            "/referees/{referee_id}/availability/check",
            get(handlers::check_availability),
        )
        .route(
            "/referees/{referee_id}/availability/{availability_id}",
            delete(handlers::delete_availability),
        )
        // Games
        .route(
            "/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route("/games/{game_id}", get(handlers::get_game))
        .route("/games/{game_id}/cancel", post(handlers::cancel_game))
        .route(
            "/games/{game_id}/eligible-referees",
            get(handlers::eligible_referees),
        )
        // Assignments
        .route(
            "/games/{game_id}/assignments",
            get(handlers::list_assignments).post(handlers::assign_referee),
        )
        .route("/games/{game_id}/auto-assign", post(handlers::auto_assign))
        .route(
            "/assignments/{assignment_id}",
            delete(handlers::delete_assignment),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
