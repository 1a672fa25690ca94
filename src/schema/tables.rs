//! Table schema definitions for stored batches

use super::types::*;

pub static TEAMS: TableSchema = TableSchema {
    name: "teams",
    columns: &[
        Column::id(),
        Column::required("team_id", ColumnType::Text).unique(),
        Column::new("source", ColumnType::Text),
        Column::required("created_at", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static POKEMON: TableSchema = TableSchema {
    name: "pokemon",
    columns: &[
        Column::id(),
        Column::required("team_id", ColumnType::Text),
        Column::new("name", ColumnType::Text),
        Column::required("type1", ColumnType::Text),
        Column::new("type2", ColumnType::Text),
        Column::new("hp", ColumnType::Real),
        Column::new("attack", ColumnType::Real),
        Column::new("defense", ColumnType::Real),
        Column::new("special_attack", ColumnType::Real),
        Column::new("special_defense", ColumnType::Real),
        Column::new("speed", ColumnType::Real),
    ],
    foreign_keys: &[ForeignKey::new("team_id", "teams").to("team_id")],
};

pub static TYPE_MATCHUPS: TableSchema = TableSchema {
    name: "type_matchups",
    columns: &[
        Column::id(),
        Column::required("pokemon_id", ColumnType::Integer),
        Column::required("type", ColumnType::Text),
        Column::new("offensive_score", ColumnType::Integer),
        Column::new("defensive_score", ColumnType::Integer),
    ],
    foreign_keys: &[ForeignKey::new("pokemon_id", "pokemon")],
};

/// All tables, parents before children
pub static ALL_TABLES: &[&TableSchema] = &[&TEAMS, &POKEMON, &TYPE_MATCHUPS];
