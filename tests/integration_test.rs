//! Integration tests that import roster files into a temporary SQLite database and read the
//! stored rows back.
//!
//! These tests:
//! 1. Write roster fixtures (CSV, JSON Lines) to a temp directory
//! 2. Import them through the same path the CLI uses
//! 3. Compare the stored rows against the expected normalized values

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use team_roster_to_sqlite::source::{open_source, FileSource};
use team_roster_to_sqlite::ui::{RecordingUi, SilentUi};
use team_roster_to_sqlite::writer::{list_batches, load_batch, SqliteWriter};
use team_roster_to_sqlite::{import_roster, Phase, RosterError, TypeLabel};

// =============================================================================
// Fixtures
// =============================================================================

const TEAM_CSV: &str = "\
 Name ,TYPE1,Type2,Health,Atk,Def,Sp. Atk,Sp. Def,Spd,Total
pikachu,Electric,,35,55,40,50,50,90,320
CHARIZARD,fire,Flying,78,84,78,109,85,100,534
  mr. mime ,psychic,fairy,40,,65,100,120,90,
garchomp,,,108,130,95,80,85,102,600
,,water,,,,,,,
dragonite,dragon,dragon,91,134,95,100,100,80,600
";

const TEAM_JSONL: &str = r#"{"name": "gengar", "type 1": "Ghost", "type 2": "Poison", "hp": 60, "speed": 110}
{"name": "snorlax", "type 1": "normal", "hp": null}
"#;

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    path
}

// =============================================================================
// Shared Test Database
// =============================================================================

/// Shared test database - created once and reused for read-only tests
static TEST_DB: Lazy<Mutex<TestDatabase>> = Lazy::new(|| Mutex::new(TestDatabase::new()));

struct TestDatabase {
    _dir: TempDir,
    db_path: PathBuf,
}

impl TestDatabase {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("roster.sqlite");
        let csv = write_fixture(dir.path(), "team_upload.csv", TEAM_CSV);

        let mut writer = SqliteWriter::open(&db_path).expect("Failed to open database");
        let source = FileSource::new(&csv);
        import_roster(&source, &mut writer, &mut SilentUi::new(), noon())
            .expect("Failed to import fixture roster");

        Self { _dir: dir, db_path }
    }

    fn connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("Failed to open test database")
    }
}

fn get_test_db() -> Connection {
    TEST_DB.lock().unwrap().connection()
}

fn member_row(conn: &Connection, position: usize) -> (i64, Option<String>, String, Option<String>) {
    conn.query_row(
        "SELECT id, name, type1, type2 FROM pokemon ORDER BY id LIMIT 1 OFFSET ?1",
        [position as i64],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
    )
    .expect("Missing pokemon row")
}

fn stat(conn: &Connection, pokemon_id: i64, column: &str) -> f64 {
    let sql = format!("SELECT {} FROM pokemon WHERE id = ?1", column);
    conn.query_row(&sql, [pokemon_id], |row| row.get(0)).unwrap()
}

fn matchup(conn: &Connection, pokemon_id: i64, type_name: &str) -> (i64, i64) {
    conn.query_row(
        "SELECT offensive_score, defensive_score FROM type_matchups
         WHERE pokemon_id = ?1 AND type = ?2",
        rusqlite::params![pokemon_id, type_name],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .unwrap()
}

// =============================================================================
// Stored Rows
// =============================================================================

#[test]
fn test_team_row() {
    let db = get_test_db();
    let (team_id, created_at): (String, String) = db
        .query_row("SELECT team_id, created_at FROM teams", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(team_id, "team_upload_20240501120000");
    assert_eq!(created_at, "2024-05-01 12:00:00");
}

#[test]
fn test_every_member_stored_in_order() {
    let db = get_test_db();
    let count: i64 = db
        .query_row(
            "SELECT COUNT(*) FROM pokemon WHERE team_id = 'team_upload_20240501120000'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 6);

    let names: Vec<Option<String>> = (0..6).map(|i| member_row(&db, i).1).collect();
    assert_eq!(
        names,
        vec![
            Some("Pikachu".to_string()),
            Some("Charizard".to_string()),
            Some("Mr. Mime".to_string()),
            Some("Garchomp".to_string()),
            None,
            Some("Dragonite".to_string()),
        ]
    );
}

#[test]
fn test_types_are_lowercased_and_resolved() {
    let db = get_test_db();
    assert_eq!(member_row(&db, 0).2, "electric");
    assert_eq!(member_row(&db, 0).3, None);
    assert_eq!(member_row(&db, 1).3.as_deref(), Some("flying"));
    // no types at all
    assert_eq!(member_row(&db, 3).2, "normal");
    // lone secondary type is promoted
    let (_, _, type1, type2) = member_row(&db, 4);
    assert_eq!(type1, "water");
    assert_eq!(type2, None);
}

#[test]
fn test_missing_stats_are_defaulted() {
    let db = get_test_db();
    let mime = member_row(&db, 2).0;
    assert_eq!(stat(&db, mime, "attack"), 81.0);
    assert_eq!(stat(&db, mime, "special_defense"), 120.0);

    let blank = member_row(&db, 4).0;
    assert_eq!(stat(&db, blank, "hp"), 71.0);
    assert_eq!(stat(&db, blank, "attack"), 81.0);
    assert_eq!(stat(&db, blank, "defense"), 75.0);
    assert_eq!(stat(&db, blank, "special_attack"), 73.0);
    assert_eq!(stat(&db, blank, "special_defense"), 72.0);
    assert_eq!(stat(&db, blank, "speed"), 70.0);
}

#[test]
fn test_each_member_has_all_matchup_rows() {
    let db = get_test_db();
    let mut stmt = db
        .prepare("SELECT pokemon_id, COUNT(*), COUNT(DISTINCT type) FROM type_matchups GROUP BY pokemon_id")
        .unwrap();
    let counts: Vec<(i64, i64, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<rusqlite::Result<_>>()
        .unwrap();

    assert_eq!(counts.len(), 6);
    for (_, total, distinct) in counts {
        assert_eq!(total, 18);
        assert_eq!(distinct, 18);
    }
}

#[test]
fn test_stored_matchup_scores() {
    let db = get_test_db();
    let charizard = member_row(&db, 1).0;
    assert_eq!(matchup(&db, charizard, "grass"), (1, 2));
    assert_eq!(matchup(&db, charizard, "rock").1, -2);
    // ground: weak as fire, immune as flying
    assert_eq!(matchup(&db, charizard, "ground").1, 1);

    // dragon/dragon stacks its own weakness twice
    let dragonite = member_row(&db, 5).0;
    assert_eq!(matchup(&db, dragonite, "dragon"), (1, -2));
    assert_eq!(matchup(&db, dragonite, "fire").1, 2);
}

#[test]
fn test_scores_within_bounds() {
    let db = get_test_db();
    let (min_off, max_off, min_def, max_def): (i64, i64, i64, i64) = db
        .query_row(
            "SELECT MIN(offensive_score), MAX(offensive_score),
                    MIN(defensive_score), MAX(defensive_score)
             FROM type_matchups",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert!(min_off >= -2 && max_off <= 1);
    assert!(min_def >= -2 && max_def <= 2);
}

// =============================================================================
// Whole Imports
// =============================================================================

#[test]
fn test_json_lines_import() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(dir.path(), "ghosts.jsonl", TEAM_JSONL);
    let mut writer = SqliteWriter::open(&dir.path().join("db.sqlite")).unwrap();

    let source = open_source(path.to_str().unwrap()).unwrap();
    let mut ui = RecordingUi::default();
    let batch = import_roster(source.as_ref(), &mut writer, &mut ui, noon()).unwrap();
    assert_eq!(batch.id.as_str(), "ghosts_20240501120000");
    assert_eq!(ui.phases.last(), Some(&Phase::Complete));

    let stored = load_batch(writer.connection(), batch.id.as_str())
        .unwrap()
        .unwrap();
    assert_eq!(stored.members.len(), 2);

    let gengar = &stored.members[0];
    assert_eq!(gengar.name.as_deref(), Some("Gengar"));
    assert_eq!(gengar.type1, "ghost");
    assert_eq!(gengar.type2.as_deref(), Some("poison"));
    assert_eq!(gengar.stats.speed, 110.0);
    assert_eq!(gengar.stats.attack, 81.0);

    let snorlax = &stored.members[1];
    assert_eq!(snorlax.name.as_deref(), Some("Snorlax"));
    assert_eq!(snorlax.type1, "normal");
    assert_eq!(snorlax.stats.hp, 71.0);
    assert_eq!(snorlax.matchups.len(), TypeLabel::ALL.len());
}

#[test]
fn test_multiple_batches_accumulate() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_fixture(dir.path(), "a.csv", "name,type1\nmew,psychic\n");
    let jsonl = write_fixture(dir.path(), "b.jsonl", TEAM_JSONL);
    let mut writer = SqliteWriter::open(&dir.path().join("db.sqlite")).unwrap();

    import_roster(&FileSource::new(&csv), &mut writer, &mut SilentUi, noon()).unwrap();
    import_roster(&FileSource::new(&jsonl), &mut writer, &mut SilentUi, noon()).unwrap();

    let batches = list_batches(writer.connection()).unwrap();
    let summary: Vec<(&str, usize)> = batches
        .iter()
        .map(|b| (b.team_id.as_str(), b.members))
        .collect();
    assert_eq!(summary, vec![("a_20240501120000", 1), ("b_20240501120000", 2)]);
}

#[test]
fn test_same_source_same_second_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_fixture(dir.path(), "team.csv", "name,type1\nmew,psychic\n");
    let mut writer = SqliteWriter::open(&dir.path().join("db.sqlite")).unwrap();

    import_roster(&FileSource::new(&csv), &mut writer, &mut SilentUi, noon()).unwrap();
    let err = import_roster(&FileSource::new(&csv), &mut writer, &mut SilentUi, noon()).unwrap_err();
    assert!(matches!(err, RosterError::Persist { .. }));

    let pokemon: i64 = writer
        .connection()
        .query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))
        .unwrap();
    assert_eq!(pokemon, 1);
}

#[test]
fn test_unreadable_source_stores_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = SqliteWriter::open(&dir.path().join("db.sqlite")).unwrap();

    let missing = dir.path().join("missing.csv");
    let err = import_roster(&FileSource::new(&missing), &mut writer, &mut SilentUi, noon())
        .unwrap_err();
    assert!(matches!(err, RosterError::Read { .. }));

    let broken = write_fixture(dir.path(), "broken.csv", "name,hp\nmew\"oops,1,2\n");
    let err = import_roster(&FileSource::new(&broken), &mut writer, &mut SilentUi, noon())
        .unwrap_err();
    assert!(matches!(err, RosterError::Csv { .. }));

    assert!(list_batches(writer.connection()).unwrap().is_empty());
}
