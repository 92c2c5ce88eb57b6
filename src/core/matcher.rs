use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::core::scoring::score_all;
use crate::error::MatchError;
use crate::models::{BestMatch, MatchReport, MatchResult, Population, ScoreEntry, ScoreTable, SeekerMatch};

/// What to do when two seeker records share a name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateSeekerPolicy {
    /// Fail the run with [`MatchError::DuplicateSeeker`]
    #[default]
    Reject,
    /// Log a warning and treat all records with the name as one seeker
    Merge,
}

/// Best-match selection over a complete score table
///
/// # Selection rule
/// 1. Partition entries by seeker name
/// 2. Keep the entry with the highest score in each partition
/// 3. On a tie, keep the provider that comes first in the provider population
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    duplicate_seekers: DuplicateSeekerPolicy,
}

impl Matcher {
    pub fn new(duplicate_seekers: DuplicateSeekerPolicy) -> Self {
        Self { duplicate_seekers }
    }

    pub fn with_default_policy() -> Self {
        Self::default()
    }

    pub fn duplicate_seekers(&self) -> DuplicateSeekerPolicy {
        self.duplicate_seekers
    }

    /// Score both populations and pick the best provider for every seeker
    ///
    /// Duplicate seekers are rejected before anything is scored.
    pub fn run(
        &self,
        providers: &Population,
        seekers: &Population,
    ) -> Result<MatchReport, MatchError> {
        tracing::info!(
            "Matching {} seekers against {} providers",
            seekers.len(),
            providers.len()
        );

        self.check_seekers(seekers)?;

        let scores = score_all(providers, seekers);
        let matches = self.find_best_matches(&scores)?;

        Ok(MatchReport { scores, matches })
    }

    /// Fail on the first repeated seeker name under [`DuplicateSeekerPolicy::Reject`]
    pub fn check_seekers(&self, seekers: &Population) -> Result<(), MatchError> {
        if self.duplicate_seekers != DuplicateSeekerPolicy::Reject {
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(seekers.len());
        match seekers.iter().find(|record| !seen.insert(record.name())) {
            Some(duplicate) => {
                tracing::warn!("Rejecting run: seeker '{}' is duplicated", duplicate.name());
                Err(MatchError::DuplicateSeeker(duplicate.name().to_string()))
            }
            None => Ok(()),
        }
    }

    /// Reduce a score table to one best provider per seeker
    ///
    /// The table must hold every (provider, seeker) pair exactly once. That
    /// is not checked here; [`score_all`] always produces such a table.
    pub fn find_best_matches(&self, table: &ScoreTable) -> Result<MatchResult, MatchError> {
        // Seeker name -> slot in `best`, in order of first appearance
        let mut slots: HashMap<&str, usize> = HashMap::with_capacity(table.seekers.len());
        let mut best: Vec<(&str, Option<&ScoreEntry>)> = Vec::with_capacity(table.seekers.len());

        for seeker in &table.seekers {
            if slots.contains_key(seeker.as_str()) {
                match self.duplicate_seekers {
                    DuplicateSeekerPolicy::Reject => {
                        tracing::warn!("Rejecting run: seeker '{}' is duplicated", seeker);
                        return Err(MatchError::DuplicateSeeker(seeker.clone()));
                    }
                    DuplicateSeekerPolicy::Merge => {
                        tracing::warn!("Merging duplicated seeker '{}' into one partition", seeker);
                        continue;
                    }
                }
            }
            slots.insert(seeker.as_str(), best.len());
            best.push((seeker.as_str(), None));
        }

        for entry in &table.entries {
            let Some(&slot) = slots.get(entry.seeker_name.as_str()) else {
                continue;
            };
            let current = &mut best[slot].1;
            if current.map_or(true, |held| beats(entry, held)) {
                *current = Some(entry);
            }
        }

        let matches = best
            .into_iter()
            .map(|(seeker_name, entry)| SeekerMatch {
                seeker_name: seeker_name.to_string(),
                best: entry.map(|e| BestMatch {
                    provider_name: e.provider_name.clone(),
                    score: e.score,
                }),
            })
            .collect();

        Ok(MatchResult::from_matches(matches))
    }
}

/// Whether `candidate` should replace `held` as a seeker's best entry
#[inline]
fn beats(candidate: &ScoreEntry, held: &ScoreEntry) -> bool {
    candidate.score > held.score
        || (candidate.score == held.score && candidate.provider_index < held.provider_index)
}
