//! Pet Match - adopter to pet compatibility matching service
//!
//! Turns a lifestyle assessment into an adopter trait profile and ranks the
//! shelter's pet population against it, split into top and other matches.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_profile, calculate_match_score, MatchError, Matcher, TierThresholds};
pub use crate::error::AppError;
pub use crate::models::{AdopterProfile, MatchResult, PetMatch, PetRecord, ScoringWeights};
pub use crate::services::MatchService;
