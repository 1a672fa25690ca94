//! Canonical roster fields and the header alias table.

use std::fmt;

/// A canonical roster column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Type1,
    Type2,
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

/// Canonical output column order
pub const CANONICAL_FIELDS: [Field; 9] = [
    Field::Name,
    Field::Type1,
    Field::Type2,
    Field::Hp,
    Field::Attack,
    Field::Defense,
    Field::SpecialAttack,
    Field::SpecialDefense,
    Field::Speed,
];

/// Known header spellings, keyed by the normalized header (see [`header_key`])
const ALIASES: &[(&str, Field)] = &[
    ("name", Field::Name),
    ("type1", Field::Type1),
    ("type 1", Field::Type1),
    ("type_1", Field::Type1),
    ("type2", Field::Type2),
    ("type 2", Field::Type2),
    ("type_2", Field::Type2),
    ("hp", Field::Hp),
    ("health", Field::Hp),
    ("hitpoints", Field::Hp),
    ("atk", Field::Attack),
    ("attack", Field::Attack),
    ("def", Field::Defense),
    ("defense", Field::Defense),
    ("sp. atk", Field::SpecialAttack),
    ("sp.atk", Field::SpecialAttack),
    ("spatk", Field::SpecialAttack),
    ("special attack", Field::SpecialAttack),
    ("specialattack", Field::SpecialAttack),
    ("special_attack", Field::SpecialAttack),
    ("sp. def", Field::SpecialDefense),
    ("sp.def", Field::SpecialDefense),
    ("spdef", Field::SpecialDefense),
    ("special defense", Field::SpecialDefense),
    ("specialdefense", Field::SpecialDefense),
    ("special_defense", Field::SpecialDefense),
    ("spd", Field::Speed),
    ("speed", Field::Speed),
];

impl Field {
    /// Column name used in normalized output
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Type1 => "type1",
            Field::Type2 => "type2",
            Field::Hp => "HP",
            Field::Attack => "attack",
            Field::Defense => "defense",
            Field::SpecialAttack => "special_attack",
            Field::SpecialDefense => "special_defense",
            Field::Speed => "speed",
        }
    }

    /// Resolve an input header through the alias table
    pub fn from_header(header: &str) -> Option<Self> {
        let key = header_key(header);
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, field)| *field)
    }

    /// Fill value for a missing stat, `None` for non-stat fields
    pub const fn stat_default(self) -> Option<f64> {
        match self {
            Field::Hp => Some(71.0),
            Field::Attack => Some(81.0),
            Field::Defense => Some(75.0),
            Field::SpecialAttack => Some(73.0),
            Field::SpecialDefense => Some(72.0),
            Field::Speed => Some(70.0),
            Field::Name | Field::Type1 | Field::Type2 => None,
        }
    }

    pub const fn is_stat(self) -> bool {
        self.stat_default().is_some()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Lowercase, trimmed, inner whitespace collapsed to single spaces
pub fn header_key(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
