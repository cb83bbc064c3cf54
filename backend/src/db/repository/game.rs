//! Game repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Game, GameId, GameStatus, NewGame};

/// Storage operations for games.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Store a new game with status [`GameStatus::Unassigned`].
    async fn create_game(&self, game: &NewGame) -> RepositoryResult<Game>;

    /// Retrieve a game by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the game doesn't exist
    async fn get_game(&self, game_id: GameId) -> RepositoryResult<Game>;

    /// List games ordered by ID, optionally filtered by status.
    async fn list_games(&self, status: Option<GameStatus>) -> RepositoryResult<Vec<Game>>;

    /// Overwrite a game's status and return the updated game.
    async fn set_game_status(&self, game_id: GameId, status: GameStatus) -> RepositoryResult<Game>;
}
