//! # Referee Scheduling Backend
//!
//! Availability evaluation and assignment for sports-league referees.
//!
//! The core question this crate answers: given a game's time slot, which
//! referees can work it, and how well does each fit? Referees carry a global
//! availability flag plus dated windows that mark time as available or
//! unavailable. Evaluation is pure; storage and HTTP sit on top of it.
//!
//! ## Architecture
//!
//! - [`models`]: Identifiers, referee/game/assignment records, availability types
//! - [`algorithms`]: Pure window validation, overlap, scoring and filtering
//! - [`db`]: Repository traits, the in-memory backend, service layer, seed loading
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based REST API (feature `http-server`)

// RepositoryError carries context for debugging
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod config;
pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
