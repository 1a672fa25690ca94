use rusqlite::{params, Connection, Transaction};
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use super::PersistenceAdapter;
use crate::batch::{Batch, TeamMember};
use crate::error::{Result, RosterError};
use crate::schema::{TableSchema, ALL_TABLES, POKEMON, TEAMS, TYPE_MATCHUPS};
use crate::types::TypeLabel;

pub(crate) const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stores batches in a SQLite database, creating the schema on open
pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open (or create) the database at `db_path`. Existing batches are kept.
    pub fn open(db_path: &Path) -> Result<Self> {
        let open_error = |source| RosterError::Open {
            path: db_path.display().to_string(),
            source,
        };

        let conn = Connection::open(db_path).map_err(open_error)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(open_error)?;

        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| RosterError::Open {
            path: ":memory:".to_string(),
            source,
        })?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let writer = Self { conn };
        writer.create_tables(ALL_TABLES)?;
        Ok(writer)
    }

    /// Create the given tables and their foreign key indexes if missing
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            self.conn.execute(&generate_create_table(schema), [])?;

            for index_sql in generate_indexes(schema) {
                self.conn.execute(&index_sql, [])?;
            }
        }
        log::debug!("Verified {} tables", schemas.len());

        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Insert a whole batch in one transaction. Returns the number of members stored.
    pub fn store_batch(&mut self, batch: &Batch) -> Result<usize> {
        let persist_error = |source| RosterError::Persist {
            batch_id: batch.id.to_string(),
            source,
        };

        let tx = self.conn.transaction().map_err(persist_error)?;
        insert_batch(&tx, batch).map_err(persist_error)?;

        let stored: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM pokemon WHERE team_id = ?1",
                [batch.id.as_str()],
                |row| row.get(0),
            )
            .map_err(persist_error)?;
        let stored = stored as usize;

        if stored != batch.len() {
            // dropping the transaction rolls it back
            return Err(RosterError::CountMismatch {
                batch_id: batch.id.to_string(),
                stored,
                expected: batch.len(),
            });
        }

        tx.commit().map_err(persist_error)?;
        log::info!("Stored {} members for batch {}", stored, batch.id);

        Ok(stored)
    }
}

impl PersistenceAdapter for SqliteWriter {
    fn persist(&mut self, batch: &Batch) -> Result<usize> {
        self.store_batch(batch)
    }
}

fn insert_batch(tx: &Transaction, batch: &Batch) -> rusqlite::Result<()> {
    tx.execute(
        &generate_insert(&TEAMS),
        params![
            batch.id.as_str(),
            batch.source,
            batch.created_at.format(CREATED_AT_FORMAT).to_string()
        ],
    )?;

    for member in &batch.members {
        let pokemon_id = insert_member(tx, batch.id.as_str(), member)?;
        log::debug!(
            "Inserted {} with id {}",
            member.name.as_deref().unwrap_or("<unnamed>"),
            pokemon_id
        );
    }

    Ok(())
}

fn insert_member(tx: &Transaction, team_id: &str, member: &TeamMember) -> rusqlite::Result<i64> {
    let stats = &member.stats;
    tx.prepare_cached(&generate_insert(&POKEMON))?.execute(params![
        team_id,
        member.name,
        member.type1,
        member.type2,
        stats.hp,
        stats.attack,
        stats.defense,
        stats.special_attack,
        stats.special_defense,
        stats.speed,
    ])?;
    let pokemon_id = tx.last_insert_rowid();

    let mut stmt = tx.prepare_cached(&generate_insert(&TYPE_MATCHUPS))?;
    for label in TypeLabel::ALL {
        stmt.execute(params![
            pokemon_id,
            label.as_str(),
            member.matchups.offensive[label],
            member.matchups.defensive[label],
        ])?;
    }

    Ok(pokemon_id)
}
