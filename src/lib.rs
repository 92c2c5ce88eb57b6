//! Tutor Match - compatibility scoring between teachers and students
//!
//! This library scores every (teacher, student) pair on grade level, style
//! and shared subjects, then assigns each student the single best teacher.
//! Ties go to the teacher listed first.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, score_all, DuplicateSeekerPolicy, Matcher};
pub use error::MatchError;
pub use models::{MatchReport, MatchResult, Population, Record, Role, ScoreEntry, ScoreTable};
