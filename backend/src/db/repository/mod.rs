//! Repository trait definitions for storage operations.
//!
//! Responsibilities are split across focused traits so implementations and
//! test doubles can be reasoned about one concern at a time.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`referee`]: Referees and their availability windows
//! - [`game`]: Games and their staffing status
//! - [`assignment`]: Referee-to-game bookings
//!
//! # Convenience Trait Bound
//!
//! For functions that need all repository capabilities, use the [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let game = repo.get_game(game_id).await?;
//!     let referees = repo.list_referees().await?;
//!     Ok(())
//! }
//! ```

pub mod assignment;
pub mod error;
pub mod game;
pub mod referee;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use assignment::AssignmentRepository;
pub use game::GameRepository;
pub use referee::RefereeRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all three
/// repository traits.
///
/// Service functions read through several calls before they write, so a
/// check can go stale under concurrent requests. Implementations are
/// responsible for keeping each write atomic: see
/// [`AssignmentRepository::create_assignment`].
pub trait FullRepository: RefereeRepository + GameRepository + AssignmentRepository {}

impl<T> FullRepository for T where T: RefereeRepository + GameRepository + AssignmentRepository {}
