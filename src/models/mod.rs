// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BestMatch, MatchReport, MatchResult, Population, Record, Role, ScoreEntry, ScoreTable, SeekerMatch};
pub use requests::{ComputeMatchesRequest, PopulationLimits, RecordInput};
pub use responses::{ComputeMatchesResponse, ErrorResponse, HealthResponse};
