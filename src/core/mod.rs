// Core algorithm exports
pub mod matcher;
pub mod report;
pub mod scoring;

pub use matcher::{DuplicateSeekerPolicy, Matcher};
pub use report::{render_matches, render_matrix};
pub use scoring::{calculate_compatibility, score_all, subject_overlap};
