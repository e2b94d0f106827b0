use serde::{Deserialize, Serialize};
use crate::models::domain::AdopterProfile;

/// Response for assessment submission and adopter lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdopterResponse {
    pub adopter: AdopterProfile,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
