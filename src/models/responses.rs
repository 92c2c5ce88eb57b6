use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchReport, ScoreEntry, SeekerMatch};

/// Response for the compute matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeMatchesResponse {
    pub scores: Vec<ScoreEntry>,
    pub matches: Vec<SeekerMatch>,
}

impl From<MatchReport> for ComputeMatchesResponse {
    fn from(report: MatchReport) -> Self {
        Self {
            scores: report.scores.entries,
            matches: report.matches.into_matches(),
        }
    }
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
