pub mod availability;

pub use availability::{
    filter_eligible_referees, has_conflict, intervals_overlap, rank_eligible_referees,
    score_availability, validate_window, AVAILABLE_SCORE,
};
