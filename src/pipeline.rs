//! Roster import flow: retrieve, normalize, resolve types, compute matchups, store.

use chrono::NaiveDateTime;

use crate::batch::{Batch, TeamMember, TEAM_SIZE};
use crate::error::Result;
use crate::parser::{normalize_table, InputFormat, NormalizedRecord, RawTable};
use crate::source::Source;
use crate::ui::{Phase, Ui};
use crate::writer::PersistenceAdapter;

/// Fetch and parse a roster into a raw table
pub fn read_roster(source: &dyn Source) -> Result<RawTable> {
    let bytes = source.fetch()?;
    let format = InputFormat::from_locator(source.locator());
    RawTable::parse(&bytes, format, source.locator())
}

/// Turn a raw table into a batch. Never fails: missing values are defaulted.
pub fn process_table(table: &RawTable, source_name: &str, at: NaiveDateTime) -> Batch {
    build_batch(normalize_roster(table, source_name), source_name, at)
}

fn normalize_roster(table: &RawTable, source_name: &str) -> Vec<NormalizedRecord> {
    if table.len() > TEAM_SIZE {
        log::warn!(
            "Roster {} has {} members, more than a team of {}",
            source_name,
            table.len(),
            TEAM_SIZE
        );
    }
    normalize_table(table)
}

fn build_batch(records: Vec<NormalizedRecord>, source_name: &str, at: NaiveDateTime) -> Batch {
    let members = records.into_iter().map(TeamMember::from_record).collect();
    Batch::new(source_name, at, members)
}

/// Run a full import. Nothing is stored unless every step before persistence succeeded.
pub fn import_roster(
    source: &dyn Source,
    store: &mut impl PersistenceAdapter,
    ui: &mut impl Ui,
    at: NaiveDateTime,
) -> Result<Batch> {
    ui.set_phase(Phase::Retrieving);
    ui.set_info(source.locator());
    let table = read_roster(source)?;
    ui.log(format!(
        "Read {} rows with columns: {}",
        table.len(),
        table.headers.join(", ")
    ));

    ui.set_phase(Phase::Normalizing);
    let records = normalize_roster(&table, source.locator());
    let unnamed = records.iter().filter(|r| r.name.is_none()).count();
    if unnamed > 0 {
        ui.log(format!("{} rows have no name", unnamed));
    }

    ui.set_phase(Phase::Computing);
    let batch = build_batch(records, source.locator(), at);
    for member in &batch.members {
        ui.log(format!(
            "{} ({}{})",
            member.name.as_deref().unwrap_or("<unnamed>"),
            member.type1,
            member
                .type2
                .as_deref()
                .map(|t| format!("/{}", t))
                .unwrap_or_default()
        ));
    }

    ui.set_phase(Phase::Persisting);
    ui.set_info(batch.id.as_str());
    let stored = store.persist(&batch)?;
    ui.log(format!("Stored {} members", stored));

    ui.set_phase(Phase::Complete);
    Ok(batch)
}
