//! Referee availability and eligibility evaluation.
//!
//! Pure functions deciding which referees may be offered a game slot. Every
//! function is total: malformed input produces `false`, `0` or an empty list,
//! never an error, so request handlers can call them while building a response
//! without any extra error plumbing.
//!
//! All times are zero-padded 24-hour `HH:MM` strings. For that format string
//! ordering is chronological ordering, which is what every comparison here
//! relies on. No timezone or date-rollover handling is done; callers scope
//! windows to the game's date before calling in.

use crate::models::{
    is_clock_time, AvailabilityWindow, EligibleReferee, GameTimeRange, RefereeCandidate, TimeSpan,
};

/// Score assigned to a referee with an available window covering the game.
///
/// Scoring is binary: a referee either fits the slot (this value) or does not (`0`).
pub const AVAILABLE_SCORE: u32 = 10;

/// Check that a window is complete and internally consistent.
///
/// True only when `date`, `start_time` and `end_time` are all present, both
/// times are valid `HH:MM`, and `start_time` is strictly before `end_time`.
/// The date is only checked for presence.
pub fn validate_window(window: &AvailabilityWindow) -> bool {
    if window.date.is_empty() || window.start_time.is_empty() || window.end_time.is_empty() {
        return false;
    }
    if !is_clock_time(&window.start_time) || !is_clock_time(&window.end_time) {
        return false;
    }
    window.start_time < window.end_time
}

/// Whether two `[start, end)` intervals share any instant.
///
/// Back-to-back intervals (`a.end == b.start`) do not overlap.
pub fn intervals_overlap<A, B>(a: &A, b: &B) -> bool
where
    A: TimeSpan + ?Sized,
    B: TimeSpan + ?Sized,
{
    a.start_time() < b.end_time() && b.start_time() < a.end_time()
}

/// Whether `outer` fully contains `inner`.
fn covers<A: TimeSpan + ?Sized, B: TimeSpan + ?Sized>(outer: &A, inner: &B) -> bool {
    outer.start_time() <= inner.start_time() && inner.end_time() <= outer.end_time()
}

/// Score how well a referee fits a game slot.
///
/// Returns [`AVAILABLE_SCORE`] if some window both covers the whole game time
/// and is marked available, otherwise `0`. A covering window marked
/// unavailable does not count, and an empty availability list scores `0`.
pub fn score_availability(referee: &RefereeCandidate, game_time: &GameTimeRange) -> u32 {
    let fits = referee
        .availability
        .iter()
        .any(|window| window.is_available && covers(window, game_time));

    if fits {
        AVAILABLE_SCORE
    } else {
        0
    }
}

/// Whether any window marked unavailable overlaps the game time.
///
/// Available windows never conflict. Having no overlapping window at all is
/// reported as no conflict, which is not the same as confirmed availability.
pub fn has_conflict(availability: &[AvailabilityWindow], game_time: &GameTimeRange) -> bool {
    availability
        .iter()
        .any(|window| !window.is_available && intervals_overlap(window, game_time))
}

/// Keep referees that are globally available and score above zero.
///
/// Survivors keep their input order and carry their score. Excluded referees
/// are dropped silently.
pub fn filter_eligible_referees(
    referees: &[RefereeCandidate],
    game_time: &GameTimeRange,
) -> Vec<EligibleReferee> {
    referees
        .iter()
        .filter(|referee| referee.is_available)
        .filter_map(|referee| {
            let score = score_availability(referee, game_time);
            (score > 0).then(|| EligibleReferee {
                referee: referee.clone(),
                availability_score: score,
            })
        })
        .collect()
}

/// Same as [`filter_eligible_referees`], ordered by descending score.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_eligible_referees(
    referees: &[RefereeCandidate],
    game_time: &GameTimeRange,
) -> Vec<EligibleReferee> {
    let mut eligible = filter_eligible_referees(referees, game_time);
    eligible.sort_by(|a, b| b.availability_score.cmp(&a.availability_score));
    eligible
}

#[cfg(test)]
#[path = "availability_tests.rs"]
mod availability_tests;
