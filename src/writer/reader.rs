//! Reading stored batches back out of the database.

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::error::Result;
use crate::parser::Stats;

/// One row of `teams` with its member count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub team_id: String,
    pub source: Option<String>,
    pub created_at: String,
    pub members: usize,
}

/// One `type_matchups` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredMatchup {
    #[serde(rename = "type")]
    pub type_name: String,
    pub offensive_score: i64,
    pub defensive_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredMember {
    pub id: i64,
    pub name: Option<String>,
    pub type1: String,
    pub type2: Option<String>,
    #[serde(flatten)]
    pub stats: Stats,
    pub matchups: Vec<StoredMatchup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredBatch {
    pub team_id: String,
    pub source: Option<String>,
    pub created_at: String,
    pub members: Vec<StoredMember>,
}

/// List every stored batch, oldest first
pub fn list_batches(conn: &Connection) -> Result<Vec<BatchSummary>> {
    let mut stmt = conn.prepare(
        "SELECT t.team_id, t.source, t.created_at, COUNT(p.id)
         FROM teams t
         LEFT JOIN pokemon p ON p.team_id = t.team_id
         GROUP BY t.id
         ORDER BY t.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(BatchSummary {
            team_id: row.get(0)?,
            source: row.get(1)?,
            created_at: row.get(2)?,
            members: row.get::<_, i64>(3)? as usize,
        })
    })?;

    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Load a batch with its members (in insertion order) and their matchup rows
pub fn load_batch(conn: &Connection, team_id: &str) -> Result<Option<StoredBatch>> {
    let header = conn
        .query_row(
            "SELECT team_id, source, created_at FROM teams WHERE team_id = ?1",
            [team_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()?;

    let Some((team_id, source, created_at)) = header else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT id, name, type1, type2, hp, attack, defense,
                special_attack, special_defense, speed
         FROM pokemon WHERE team_id = ?1 ORDER BY id",
    )?;
    let mut members = stmt
        .query_map([&team_id], |row| {
            Ok(StoredMember {
                id: row.get(0)?,
                name: row.get(1)?,
                type1: row.get(2)?,
                type2: row.get(3)?,
                stats: Stats {
                    hp: row.get(4)?,
                    attack: row.get(5)?,
                    defense: row.get(6)?,
                    special_attack: row.get(7)?,
                    special_defense: row.get(8)?,
                    speed: row.get(9)?,
                },
                matchups: Vec::new(),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(
        "SELECT type, offensive_score, defensive_score
         FROM type_matchups WHERE pokemon_id = ?1 ORDER BY id",
    )?;
    for member in &mut members {
        member.matchups = stmt
            .query_map([member.id], |row| {
                Ok(StoredMatchup {
                    type_name: row.get(0)?,
                    offensive_score: row.get(1)?,
                    defensive_score: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
    }

    Ok(Some(StoredBatch {
        team_id,
        source,
        created_at,
        members,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{Batch, TeamMember};
    use crate::parser::NormalizedRecord;
    use crate::writer::SqliteWriter;
    use chrono::NaiveDate;

    fn stored_writer() -> SqliteWriter {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let members = vec![
            TeamMember::from_record(NormalizedRecord {
                name: Some("Gengar".into()),
                type1: Some("ghost".into()),
                type2: Some("poison".into()),
                stats: Stats::default(),
            }),
            TeamMember::from_record(NormalizedRecord {
                name: None,
                type1: None,
                type2: None,
                stats: Stats::default(),
            }),
        ];

        let mut writer = SqliteWriter::open_in_memory().unwrap();
        writer
            .store_batch(&Batch::new("uploads/team.csv", at, members))
            .unwrap();
        writer
    }

    #[test]
    fn test_list_batches() {
        let writer = stored_writer();
        let batches = list_batches(writer.connection()).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].team_id, "team_20240501120000");
        assert_eq!(batches[0].source.as_deref(), Some("uploads/team.csv"));
        assert_eq!(batches[0].created_at, "2024-05-01 12:00:00");
        assert_eq!(batches[0].members, 2);
    }

    #[test]
    fn test_load_batch_round_trips_members() {
        let writer = stored_writer();
        let batch = load_batch(writer.connection(), "team_20240501120000")
            .unwrap()
            .unwrap();

        assert_eq!(batch.members.len(), 2);
        let gengar = &batch.members[0];
        assert_eq!(gengar.name.as_deref(), Some("Gengar"));
        assert_eq!(gengar.type2.as_deref(), Some("poison"));
        assert_eq!(gengar.matchups.len(), 18);
        assert_eq!(gengar.matchups[0].type_name, "normal");

        let normal = gengar.matchups.iter().find(|m| m.type_name == "normal").unwrap();
        // ghost is immune to normal
        assert_eq!(normal.defensive_score, 2);

        let unnamed = &batch.members[1];
        assert_eq!(unnamed.name, None);
        assert_eq!(unnamed.type1, "normal");
        assert_eq!(unnamed.stats, Stats::default());
    }

    #[test]
    fn test_load_unknown_batch() {
        let writer = stored_writer();
        assert!(load_batch(writer.connection(), "nope").unwrap().is_none());
    }
}
