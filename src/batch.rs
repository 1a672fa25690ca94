//! Batches of processed team members and their identifiers.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::parser::{resolve_types, NormalizedRecord, Stats};
use crate::types::MatchupProfile;

/// Nominal team size; larger rosters are processed with a warning
pub const TEAM_SIZE: usize = 6;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Identifier of one processed roster: `<source stem>_<YYYYMMDDHHMMSS>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Derive the id from the source name and the processing time.
    ///
    /// Two batches from the same source within the same second get the same id; the
    /// store rejects the second one.
    pub fn generate(source_name: &str, at: NaiveDateTime) -> Self {
        Self(format!("{}_{}", source_stem(source_name), at.format(TIMESTAMP_FORMAT)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// File name without directories, extension, or URL query
fn source_stem(source_name: &str) -> &str {
    let path = source_name.split(['?', '#']).next().unwrap_or(source_name);
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("roster")
}

/// A normalized, type-resolved team member with its matchup profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    pub name: Option<String>,
    pub type1: String,
    pub type2: Option<String>,
    #[serde(flatten)]
    pub stats: Stats,
    pub matchups: MatchupProfile,
}

impl TeamMember {
    /// Resolve types and compute the matchup profile for one normalized row
    pub fn from_record(record: NormalizedRecord) -> Self {
        let (type1, type2) = resolve_types(record.type1, record.type2);
        let matchups = MatchupProfile::calculate(&type1, type2.as_deref());

        Self {
            name: record.name,
            type1,
            type2,
            stats: record.stats,
            matchups,
        }
    }
}

/// Everything produced by one processing run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch {
    pub id: BatchId,
    pub source: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    pub members: Vec<TeamMember>,
}

impl Batch {
    pub fn new(source: &str, created_at: NaiveDateTime, members: Vec<TeamMember>) -> Self {
        Self {
            id: BatchId::generate(source, created_at),
            source: source.to_string(),
            created_at,
            members,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&at.format("%Y-%m-%d %H:%M:%S"))
    }
}
