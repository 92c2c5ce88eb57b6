use thiserror::Error;

/// Errors raised while building records or matching populations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("record name must not be empty")]
    EmptyName,

    #[error("record '{record}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        record: String,
        attribute: &'static str,
    },

    #[error("seeker '{0}' appears more than once")]
    DuplicateSeeker(String),

    #[error("{role} population has {size} records, limit is {limit}")]
    PopulationTooLarge {
        role: &'static str,
        size: usize,
        limit: usize,
    },

    #[error("{providers} providers x {seekers} seekers exceeds the limit of {limit} scored pairs")]
    TooManyPairs {
        providers: usize,
        seekers: usize,
        limit: usize,
    },
}

impl MatchError {
    /// Short machine-readable label used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::EmptyName => "empty_name",
            MatchError::MissingAttribute { .. } => "missing_attribute",
            MatchError::DuplicateSeeker(_) => "duplicate_seeker",
            MatchError::PopulationTooLarge { .. } => "population_too_large",
            MatchError::TooManyPairs { .. } => "too_many_pairs",
        }
    }
}
