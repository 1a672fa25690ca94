use serde::Serialize;
use std::collections::HashMap;

use super::fields::{Field, CANONICAL_FIELDS};
use super::table::{CellValue, RawTable};

static NULL_CELL: CellValue = CellValue::Null;

/// The six base stats, never missing after normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    #[serde(rename = "HP")]
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub special_attack: f64,
    pub special_defense: f64,
    pub speed: f64,
}

impl Stats {
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Hp => Some(self.hp),
            Field::Attack => Some(self.attack),
            Field::Defense => Some(self.defense),
            Field::SpecialAttack => Some(self.special_attack),
            Field::SpecialDefense => Some(self.special_defense),
            Field::Speed => Some(self.speed),
            Field::Name | Field::Type1 | Field::Type2 => None,
        }
    }

    fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::Hp => self.hp = value,
            Field::Attack => self.attack = value,
            Field::Defense => self.defense = value,
            Field::SpecialAttack => self.special_attack = value,
            Field::SpecialDefense => self.special_defense = value,
            Field::Speed => self.speed = value,
            Field::Name | Field::Type1 | Field::Type2 => {}
        }
    }
}

impl Default for Stats {
    /// Every stat at its fill value
    fn default() -> Self {
        Self {
            hp: 71.0,
            attack: 81.0,
            defense: 75.0,
            special_attack: 73.0,
            special_defense: 72.0,
            speed: 70.0,
        }
    }
}

/// One row with canonical fields, before type fallback rules
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub name: Option<String>,
    pub type1: Option<String>,
    pub type2: Option<String>,
    pub stats: Stats,
}

/// Maps canonical fields to input column positions
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<Field, usize>,
}

impl ColumnMap {
    /// Resolve headers through the alias table. The left-most header wins when several
    /// map to the same field; unknown headers are dropped.
    pub fn from_headers(headers: &[String]) -> Self {
        let mut positions = HashMap::new();

        for (idx, header) in headers.iter().enumerate() {
            match Field::from_header(header) {
                Some(field) => {
                    if positions.contains_key(&field) {
                        log::warn!(
                            "Column '{}' duplicates {}, ignoring it",
                            header.trim(),
                            field
                        );
                    } else {
                        positions.insert(field, idx);
                    }
                }
                None => log::debug!("Dropping unrecognized column '{}'", header.trim()),
            }
        }

        for field in CANONICAL_FIELDS {
            if !positions.contains_key(&field) {
                log::debug!("Column {} missing, filling with nulls", field);
            }
        }

        Self { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    fn cell<'a>(&self, row: &'a [CellValue], field: Field) -> &'a CellValue {
        self.position(field)
            .and_then(|idx| row.get(idx))
            .unwrap_or(&NULL_CELL)
    }
}

/// Normalize every row of a raw table
pub fn normalize_table(table: &RawTable) -> Vec<NormalizedRecord> {
    let columns = ColumnMap::from_headers(&table.headers);
    table
        .rows
        .iter()
        .map(|row| normalize_row(row, &columns))
        .collect()
}

/// Normalize one row: clean text fields and fill missing stats
pub fn normalize_row(row: &[CellValue], columns: &ColumnMap) -> NormalizedRecord {
    let mut stats = Stats::default();
    for field in CANONICAL_FIELDS.into_iter().filter(|f| f.is_stat()) {
        if let Some(value) = stat_value(columns.cell(row, field), field) {
            stats.set(field, value);
        }
    }

    NormalizedRecord {
        name: text_value(columns.cell(row, Field::Name), title_case),
        type1: text_value(columns.cell(row, Field::Type1), str::to_lowercase),
        type2: text_value(columns.cell(row, Field::Type2), str::to_lowercase),
        stats,
    }
}

/// Render records back into a table with the canonical headers
pub fn to_table(records: &[NormalizedRecord]) -> RawTable {
    let headers = CANONICAL_FIELDS
        .iter()
        .map(|f| f.canonical_name().to_string())
        .collect();
    let mut table = RawTable::new(headers);

    let text = |value: &Option<String>| match value {
        Some(s) => CellValue::Text(s.clone()),
        None => CellValue::Null,
    };

    for record in records {
        let row = CANONICAL_FIELDS
            .iter()
            .map(|field| match field {
                Field::Name => text(&record.name),
                Field::Type1 => text(&record.type1),
                Field::Type2 => text(&record.type2),
                stat => record
                    .stats
                    .get(*stat)
                    .map(CellValue::Number)
                    .unwrap_or(CellValue::Null),
            })
            .collect();
        table.rows.push(row);
    }

    table
}

/// Trim and clean text; numbers are kept as their plain rendering
fn text_value(cell: &CellValue, clean: impl Fn(&str) -> String) -> Option<String> {
    match cell {
        CellValue::Null => None,
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(clean(trimmed))
            }
        }
        CellValue::Number(n) => Some(n.to_string()),
    }
}

/// `None` means the stat falls back to its default
fn stat_value(cell: &CellValue, field: Field) -> Option<f64> {
    let value = match cell {
        CellValue::Null => return None,
        CellValue::Number(n) => *n,
        CellValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => {
                log::warn!("Unreadable {} value '{}', using default", field, s.trim());
                return None;
            }
        },
    };

    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Uppercase the first letter of each word, lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                // Multi-char uppercase forms (ß -> SS) keep only their first letter capital
                let mut upper = c.to_uppercase();
                out.extend(upper.next());
                out.extend(upper.flat_map(char::to_lowercase));
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut table = RawTable::new(headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.rows.push(
                row.iter()
                    .map(|c| {
                        if c.is_empty() {
                            CellValue::Null
                        } else {
                            CellValue::Text(c.to_string())
                        }
                    })
                    .collect(),
            );
        }
        table
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mr. mime"), "Mr. Mime");
        assert_eq!(title_case("PIKACHU"), "Pikachu");
        assert_eq!(title_case("ho-oh"), "Ho-Oh");
        assert_eq!(title_case("porygon2"), "Porygon2");
        assert_eq!(title_case("ßeta"), "Sseta");
        assert_eq!(title_case("\u{fb01}re fox"), "Fire Fox");
    }

    #[test]
    fn test_expanding_names_normalize_once() {
        let raw = table(&["name"], &[&["ßeta"], &["\u{fb01}re fox"], &["mr. mime"]]);
        let once = normalize_table(&raw);
        let twice = normalize_table(&to_table(&once));
        assert_eq!(once, twice);
        assert_eq!(once[0].name.as_deref(), Some("Sseta"));
    }

    #[test]
    fn test_aliased_headers_and_cleanup() {
        let raw = table(
            &[" NAME ", "Type 1", "type2", "Health", "Atk", "Def", "Sp. Atk", "Sp. Def", "Spd"],
            &[&["  charizard ", " FIRE", "Flying ", "78", "84", "78", "109", "85", "100"]],
        );
        let records = normalize_table(&raw);
        assert_eq!(records.len(), 1);

        let rec = &records[0];
        assert_eq!(rec.name.as_deref(), Some("Charizard"));
        assert_eq!(rec.type1.as_deref(), Some("fire"));
        assert_eq!(rec.type2.as_deref(), Some("flying"));
        assert_eq!(rec.stats.hp, 78.0);
        assert_eq!(rec.stats.special_attack, 109.0);
        assert_eq!(rec.stats.speed, 100.0);
    }

    #[test]
    fn test_missing_stats_use_defaults() {
        let raw = table(
            &["name", "hp", "attack", "defense", "special attack", "special defense", "speed"],
            &[
                &["a", "", "1", "1", "1", "1", "1"],
                &["b", "1", "", "1", "1", "1", "1"],
                &["c", "1", "1", "", "1", "1", "1"],
                &["d", "1", "1", "1", "", "1", "1"],
                &["e", "1", "1", "1", "1", "", "1"],
                &["f", "1", "1", "1", "1", "1", ""],
            ],
        );
        let records = normalize_table(&raw);
        assert_eq!(records[0].stats.hp, 71.0);
        assert_eq!(records[1].stats.attack, 81.0);
        assert_eq!(records[2].stats.defense, 75.0);
        assert_eq!(records[3].stats.special_attack, 73.0);
        assert_eq!(records[4].stats.special_defense, 72.0);
        assert_eq!(records[5].stats.speed, 70.0);
        assert_eq!(records[0].stats.attack, 1.0);
    }

    #[test]
    fn test_absent_columns_are_null_or_default() {
        let raw = table(&["Name"], &[&["snorlax"]]);
        let rec = &normalize_table(&raw)[0];
        assert_eq!(rec.type1, None);
        assert_eq!(rec.type2, None);
        assert_eq!(rec.stats, Stats::default());
    }

    #[test]
    fn test_malformed_stat_is_defaulted() {
        let raw = table(&["name", "speed", "hp"], &[&["jolteon", "fast", "NaN"]]);
        let rec = &normalize_table(&raw)[0];
        assert_eq!(rec.stats.speed, 70.0);
        assert_eq!(rec.stats.hp, 71.0);
    }

    #[test]
    fn test_first_duplicate_header_wins() {
        let raw = table(&["hp", "health"], &[&["10", "20"]]);
        assert_eq!(normalize_table(&raw)[0].stats.hp, 10.0);
    }

    #[test]
    fn test_numeric_cells_in_text_fields() {
        let raw = RawTable {
            headers: vec!["name".into(), "type1".into()],
            rows: vec![vec![CellValue::Number(151.0), CellValue::Null]],
        };
        let rec = &normalize_table(&raw)[0];
        assert_eq!(rec.name.as_deref(), Some("151"));
        assert_eq!(rec.type1, None);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = table(
            &["Name", "TYPE1", "Type2", "HitPoints", "Sp.Def"],
            &[
                &["bulbasaur", "Grass", "poison", "45", ""],
                &["", "", "water", "", "50"],
            ],
        );
        let once = normalize_table(&raw);
        let twice = normalize_table(&to_table(&once));
        assert_eq!(once, twice);
        assert_eq!(to_table(&once), to_table(&twice));
    }
}
