//! Storage module for referees, availability, games and assignments.
//!
//! This module provides abstractions for storage operations via the Repository
//! pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, seed loader, tests)       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! Go through the service layer rather than calling repository methods
//! directly; it carries the validation and assignment rules:
//!
//! ```ignore
//! use referee_backend::db::{services, LocalRepository};
//!
//! let repo = LocalRepository::new();
//! let eligible = services::eligible_referees_for_game(&repo, game_id, true).await?;
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;
pub mod seed;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{
    AssignmentRepository, ErrorContext, FullRepository, GameRepository, RefereeRepository,
    RepositoryError, RepositoryResult,
};
pub use seed::{apply_seed, SeedData, SeedSummary};
