use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::MatchError;

/// Attribute key holding the comma-separated subject list
pub const SUBJECTS_ATTR: &str = "subjects";
/// Attribute key holding the grade level
pub const GRADE_LEVEL_ATTR: &str = "grade_level";
/// Attribute key holding the teaching or learning style
pub const STYLE_ATTR: &str = "style";

/// A teacher or student with the attributes used for compatibility scoring
///
/// Records are immutable once built. Subjects form a set, so duplicates
/// collapse; tokens are kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    name: String,
    subjects: BTreeSet<String>,
    #[serde(rename = "gradeLevel")]
    grade_level: String,
    style: String,
}

impl Record {
    /// Build a record from already-split attributes
    pub fn new<I, S>(
        name: impl Into<String>,
        subjects: I,
        grade_level: impl Into<String>,
        style: impl Into<String>,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(MatchError::EmptyName);
        }

        Ok(Self {
            name,
            subjects: subjects.into_iter().map(Into::into).collect(),
            grade_level: grade_level.into(),
            style: style.into(),
        })
    }

    /// Build a record from an attribute -> value map
    ///
    /// `subjects` is a comma-separated list split without trimming; an empty
    /// value means no subjects. Unknown attributes are ignored.
    pub fn from_attributes(
        name: impl Into<String>,
        attributes: &HashMap<String, String>,
    ) -> Result<Self, MatchError> {
        let name = name.into();
        let required = |attribute: &'static str| {
            attributes
                .get(attribute)
                .ok_or_else(|| MatchError::MissingAttribute {
                    record: name.clone(),
                    attribute,
                })
        };

        let subjects = required(SUBJECTS_ATTR)?;
        let grade_level = required(GRADE_LEVEL_ATTR)?.clone();
        let style = required(STYLE_ATTR)?.clone();

        let tokens: Vec<&str> = if subjects.is_empty() {
            Vec::new()
        } else {
            subjects.split(',').collect()
        };

        Self::new(name, tokens, grade_level, style)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn subjects(&self) -> &BTreeSet<String> {
        &self.subjects
    }

    pub fn grade_level(&self) -> &str {
        &self.grade_level
    }

    pub fn style(&self) -> &str {
        &self.style
    }
}

/// Which side of the matching a population sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Members being matched against (teachers)
    Provider,
    /// Members a best match is sought for (students)
    Seeker,
}

/// An ordered, role-tagged sequence of records
#[derive(Debug, Clone)]
pub struct Population {
    role: Role,
    records: Vec<Record>,
}

impl Population {
    pub fn new(role: Role, records: Vec<Record>) -> Self {
        Self { role, records }
    }

    pub fn providers(records: Vec<Record>) -> Self {
        Self::new(Role::Provider, records)
    }

    pub fn seekers(records: Vec<Record>) -> Self {
        Self::new(Role::Seeker, records)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

/// Score for one (provider, seeker) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(rename = "providerName")]
    pub provider_name: String,
    #[serde(rename = "seekerName")]
    pub seeker_name: String,
    pub score: u32,
    /// Position of the provider in its population
    #[serde(skip)]
    pub provider_index: usize,
    /// Position of the seeker in its population
    #[serde(skip)]
    pub seeker_index: usize,
}

/// Complete provider x seeker cross product for one run
///
/// Entries are stored provider-major: all seekers for the first provider,
/// then all seekers for the second, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTable {
    pub providers: Vec<String>,
    pub seekers: Vec<String>,
    pub entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at provider row `provider_index`, seeker column `seeker_index`
    pub fn at(&self, provider_index: usize, seeker_index: usize) -> Option<&ScoreEntry> {
        if provider_index >= self.providers.len() || seeker_index >= self.seekers.len() {
            return None;
        }
        self.entries
            .get(provider_index * self.seekers.len() + seeker_index)
    }

    /// Score of the first pair with the given names
    pub fn score(&self, provider_name: &str, seeker_name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.provider_name == provider_name && e.seeker_name == seeker_name)
            .map(|e| e.score)
    }

    /// One row of scores per provider, seekers as columns
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[ScoreEntry])> {
        let width = self.seekers.len();
        self.providers.iter().enumerate().map(move |(row, provider)| {
            let start = row * width;
            let cells = self.entries.get(start..start + width).unwrap_or(&[]);
            (provider.as_str(), cells)
        })
    }
}

/// Winning provider for a seeker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMatch {
    #[serde(rename = "providerName")]
    pub provider_name: String,
    pub score: u32,
}

/// Outcome for a single seeker; `best` is `None` when there are no providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerMatch {
    #[serde(rename = "seekerName")]
    pub seeker_name: String,
    pub best: Option<BestMatch>,
}

/// Best provider per seeker, in seeker population order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchResult {
    matches: Vec<SeekerMatch>,
}

impl MatchResult {
    pub(crate) fn from_matches(matches: Vec<SeekerMatch>) -> Self {
        Self { matches }
    }

    pub fn get(&self, seeker_name: &str) -> Option<&BestMatch> {
        self.matches
            .iter()
            .find(|m| m.seeker_name == seeker_name)
            .and_then(|m| m.best.as_ref())
    }

    pub fn contains_seeker(&self, seeker_name: &str) -> bool {
        self.matches.iter().any(|m| m.seeker_name == seeker_name)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeekerMatch> {
        self.matches.iter()
    }

    pub fn into_matches(self) -> Vec<SeekerMatch> {
        self.matches
    }
}

/// Score table and best matches produced by one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub scores: ScoreTable,
    pub matches: MatchResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_attributes_splits_subjects() {
        let record = Record::from_attributes(
            "Ms. Johnson",
            &attrs(&[
                ("subjects", "Math,Science,Math"),
                ("grade_level", "Elementary"),
                ("style", "Visual"),
                ("room", "12B"),
            ]),
        )
        .unwrap();

        assert_eq!(record.name(), "Ms. Johnson");
        assert_eq!(record.subjects().len(), 2);
        assert!(record.subjects().contains("Math"));
        assert!(record.subjects().contains("Science"));
        assert_eq!(record.grade_level(), "Elementary");
        assert_eq!(record.style(), "Visual");
    }

    #[test]
    fn test_from_attributes_keeps_tokens_untrimmed() {
        let record = Record::from_attributes(
            "Bob",
            &attrs(&[
                ("subjects", "English, History"),
                ("grade_level", "Middle"),
                ("style", "Auditory"),
            ]),
        )
        .unwrap();

        assert!(record.subjects().contains(" History"));
        assert!(!record.subjects().contains("History"));
    }

    #[test]
    fn test_from_attributes_empty_subjects() {
        let record = Record::from_attributes(
            "Dana",
            &attrs(&[("subjects", ""), ("grade_level", ""), ("style", "")]),
        )
        .unwrap();

        assert!(record.subjects().is_empty());
        assert_eq!(record.grade_level(), "");
    }

    #[test]
    fn test_from_attributes_missing_attribute() {
        let err = Record::from_attributes(
            "Eve",
            &attrs(&[("subjects", "Math"), ("grade_level", "Middle")]),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            MatchError::MissingAttribute { ref record, attribute: "style" } if record == "Eve"
        ));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Record::new("", ["Math"], "Middle", "Visual").unwrap_err();
        assert!(matches!(err, MatchError::EmptyName));
    }

    #[test]
    fn test_population_role() {
        let population = Population::seekers(vec![]);
        assert_eq!(population.role(), Role::Seeker);
        assert!(population.is_empty());
    }

    #[test]
    fn test_score_table_at_out_of_range() {
        let table = ScoreTable {
            providers: vec!["p".to_string()],
            seekers: vec![],
            entries: vec![],
        };
        assert!(table.at(0, 0).is_none());
        assert!(table.at(1, 0).is_none());
    }
}
