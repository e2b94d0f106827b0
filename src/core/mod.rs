// Core algorithm exports
pub mod error;
pub mod filters;
pub mod matcher;
pub mod profile;
pub mod schema;
pub mod scoring;

pub use error::MatchError;
pub use filters::{eligible_population, is_matchable};
pub use matcher::{Matcher, Tier, TierThresholds};
pub use profile::{build_profile, AdopterIdentity, Answer, AssessmentAnswers};
pub use schema::{trait_domain, OrdinalTrait, SpaceRequirement, TraitDomain, TraitName, TraitVector};
pub use scoring::calculate_match_score;
