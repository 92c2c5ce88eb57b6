use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::error::MatchError;
use crate::models::domain::{Population, Record, Role};

/// A record as supplied by a client: a name plus its attribute map
///
/// ```json
/// { "name": "Alice", "attributes": { "subjects": "Math,Science", "grade_level": "Elementary", "style": "Visual" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl RecordInput {
    pub fn into_record(self) -> Result<Record, MatchError> {
        Record::from_attributes(self.name, &self.attributes)
    }
}

/// Request to score two populations and match them
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComputeMatchesRequest {
    #[serde(default)]
    #[validate(nested)]
    pub providers: Vec<RecordInput>,
    #[serde(default)]
    #[validate(nested)]
    pub seekers: Vec<RecordInput>,
}

/// Size caps applied before any record is built or scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationLimits {
    pub max_population: usize,
    pub max_pairs: usize,
}

impl ComputeMatchesRequest {
    /// Build both populations, failing on the first malformed record, when
    /// either side exceeds `max_population`, or when the cross product
    /// exceeds `max_pairs`
    pub fn into_populations(
        self,
        limits: PopulationLimits,
    ) -> Result<(Population, Population), MatchError> {
        let pairs = self.providers.len().saturating_mul(self.seekers.len());
        if pairs > limits.max_pairs {
            return Err(MatchError::TooManyPairs {
                providers: self.providers.len(),
                seekers: self.seekers.len(),
                limit: limits.max_pairs,
            });
        }

        let providers = build_population(Role::Provider, self.providers, limits.max_population)?;
        let seekers = build_population(Role::Seeker, self.seekers, limits.max_population)?;
        Ok((providers, seekers))
    }
}

fn build_population(
    role: Role,
    inputs: Vec<RecordInput>,
    limit: usize,
) -> Result<Population, MatchError> {
    if inputs.len() > limit {
        return Err(MatchError::PopulationTooLarge {
            role: match role {
                Role::Provider => "provider",
                Role::Seeker => "seeker",
            },
            size: inputs.len(),
            limit,
        });
    }

    let records = inputs
        .into_iter()
        .map(RecordInput::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Population::new(role, records))
}
