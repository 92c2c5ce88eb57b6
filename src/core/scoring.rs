use crate::models::{Population, Record, ScoreEntry, ScoreTable};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calculate the compatibility score between a provider and a seeker
///
/// Scoring formula:
/// score = (
///     1 if grade levels are equal +
///     1 if styles are equal +
///     number of shared subjects
/// )
///
/// Strings compare exactly, so two empty grade levels count as equal.
/// The result is symmetric in its arguments.
#[inline]
pub fn calculate_compatibility(provider: &Record, seeker: &Record) -> u32 {
    let grade_score = u32::from(provider.grade_level() == seeker.grade_level());
    let style_score = u32::from(provider.style() == seeker.style());

    grade_score + style_score + subject_overlap(provider, seeker)
}

/// Number of subjects both records share
#[inline]
pub fn subject_overlap(a: &Record, b: &Record) -> u32 {
    let (small, large) = if a.subjects().len() <= b.subjects().len() {
        (a.subjects(), b.subjects())
    } else {
        (b.subjects(), a.subjects())
    };

    small.iter().filter(|subject| large.contains(*subject)).count() as u32
}

/// Score every (provider, seeker) pair
///
/// Entries come back provider-major regardless of whether the `parallel`
/// feature is enabled.
pub fn score_all(providers: &Population, seekers: &Population) -> ScoreTable {
    let seeker_records = seekers.records();

    let score_row = |(provider_index, provider): (usize, &Record)| -> Vec<ScoreEntry> {
        seeker_records
            .iter()
            .enumerate()
            .map(|(seeker_index, seeker)| ScoreEntry {
                provider_name: provider.name().to_string(),
                seeker_name: seeker.name().to_string(),
                score: calculate_compatibility(provider, seeker),
                provider_index,
                seeker_index,
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<ScoreEntry>> = providers
        .records()
        .par_iter()
        .enumerate()
        .map(score_row)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<ScoreEntry>> = providers
        .records()
        .iter()
        .enumerate()
        .map(score_row)
        .collect();

    tracing::debug!(
        "Scored {} providers against {} seekers",
        providers.len(),
        seekers.len()
    );

    ScoreTable {
        providers: providers.iter().map(|r| r.name().to_string()).collect(),
        seekers: seeker_records.iter().map(|r| r.name().to_string()).collect(),
        entries: rows.into_iter().flatten().collect(),
    }
}
