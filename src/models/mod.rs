// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AdopterProfile, MatchResult, NewAdopter, PetMatch, PetRecord, PetStatus, ScoringWeights};
pub use requests::SubmitAssessmentRequest;
pub use responses::{AdopterResponse, ErrorResponse, HealthResponse};
