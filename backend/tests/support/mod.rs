#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use referee_backend::db::{services, LocalRepository};
use referee_backend::models::{AvailabilityWindow, Game, NewGame, NewReferee, Referee};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub const GAME_DAY: &str = "2025-01-20";

pub fn new_referee(name: &str) -> NewReferee {
    NewReferee {
        name: name.to_string(),
        email: Some(format!("{}@league.test", name.to_lowercase().replace(' ', "."))),
        is_available: true,
    }
}

pub fn new_game(start: &str, end: &str, required: u32) -> NewGame {
    NewGame {
        date: GAME_DAY.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        home_team: "Hawks".to_string(),
        away_team: "Owls".to_string(),
        location: Some("North Field".to_string()),
        referees_required: required,
    }
}

/// Store a referee with one available window on [`GAME_DAY`].
pub async fn referee_available(repo: &LocalRepository, name: &str, start: &str, end: &str) -> Referee {
    let referee = services::create_referee(repo, &new_referee(name))
        .await
        .expect("create referee");
    services::add_availability(repo, referee.id, &AvailabilityWindow::available(GAME_DAY, start, end))
        .await
        .expect("add availability");
    referee
}

pub async fn game(repo: &LocalRepository, start: &str, end: &str, required: u32) -> Game {
    services::create_game(repo, &new_game(start, end, required))
        .await
        .expect("create game")
}
