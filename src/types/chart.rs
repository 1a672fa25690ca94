//! Static type effectiveness chart.
//!
//! The chart is stored sparsely, the way it is usually written down: one row per attacking
//! type listing only the defending types that deviate from neutral. A dense 18×18 matrix is
//! derived from it at compile time for direct lookups.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Number of type labels in the chart
pub const TYPE_COUNT: usize = 18;

/// Super effective
pub const SUPER_EFFECTIVE: i8 = 1;
/// Default for any pair the chart does not list
pub const NEUTRAL: i8 = 0;
/// Not very effective
pub const NOT_VERY_EFFECTIVE: i8 = -1;
/// No effect
pub const NO_EFFECT: i8 = -2;

/// One of the 18 fixed type labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeLabel {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl TypeLabel {
    /// All labels in canonical order. Profiles and persisted matchup rows follow this order.
    pub const ALL: [TypeLabel; TYPE_COUNT] = [
        TypeLabel::Normal,
        TypeLabel::Fire,
        TypeLabel::Water,
        TypeLabel::Electric,
        TypeLabel::Grass,
        TypeLabel::Ice,
        TypeLabel::Fighting,
        TypeLabel::Poison,
        TypeLabel::Ground,
        TypeLabel::Flying,
        TypeLabel::Psychic,
        TypeLabel::Bug,
        TypeLabel::Rock,
        TypeLabel::Ghost,
        TypeLabel::Dragon,
        TypeLabel::Dark,
        TypeLabel::Steel,
        TypeLabel::Fairy,
    ];

    /// Lowercase canonical name
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeLabel::Normal => "normal",
            TypeLabel::Fire => "fire",
            TypeLabel::Water => "water",
            TypeLabel::Electric => "electric",
            TypeLabel::Grass => "grass",
            TypeLabel::Ice => "ice",
            TypeLabel::Fighting => "fighting",
            TypeLabel::Poison => "poison",
            TypeLabel::Ground => "ground",
            TypeLabel::Flying => "flying",
            TypeLabel::Psychic => "psychic",
            TypeLabel::Bug => "bug",
            TypeLabel::Rock => "rock",
            TypeLabel::Ghost => "ghost",
            TypeLabel::Dragon => "dragon",
            TypeLabel::Dark => "dark",
            TypeLabel::Steel => "steel",
            TypeLabel::Fairy => "fairy",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a label leniently, returning `None` for anything outside the chart
    pub fn parse(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for TypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TypeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        TypeLabel::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| format!("Unknown type: {}", s.trim()))
    }
}

use TypeLabel::*;

/// Attacking type → defending types that deviate from neutral
pub const CHART: &[(TypeLabel, &[(TypeLabel, i8)])] = &[
    (Normal, &[(Rock, -1), (Ghost, -2), (Steel, -1)]),
    (
        Fire,
        &[
            (Fire, -1),
            (Water, -1),
            (Grass, 1),
            (Ice, 1),
            (Bug, 1),
            (Rock, -1),
            (Dragon, -1),
            (Steel, 1),
        ],
    ),
    (
        Water,
        &[
            (Fire, 1),
            (Water, -1),
            (Grass, -1),
            (Ground, 1),
            (Rock, 1),
            (Dragon, -1),
        ],
    ),
    (
        Grass,
        &[
            (Fire, -1),
            (Water, 1),
            (Grass, -1),
            (Poison, -1),
            (Ground, 1),
            (Flying, -1),
            (Bug, -1),
            (Rock, 1),
            (Dragon, -1),
            (Steel, -1),
        ],
    ),
    (
        Electric,
        &[
            (Water, 1),
            (Grass, -1),
            (Electric, -1),
            (Ground, -2),
            (Flying, 1),
            (Dragon, -1),
        ],
    ),
    (
        Ice,
        &[
            (Fire, -1),
            (Water, -1),
            (Grass, 1),
            (Ice, -1),
            (Ground, 1),
            (Flying, 1),
            (Dragon, 1),
            (Steel, -1),
        ],
    ),
    (
        Fighting,
        &[
            (Normal, 1),
            (Ice, 1),
            (Poison, -1),
            (Flying, -1),
            (Psychic, -1),
            (Bug, -1),
            (Rock, 1),
            (Ghost, -2),
            (Dark, 1),
            (Steel, 1),
            (Fairy, -1),
        ],
    ),
    (
        Poison,
        &[
            (Grass, 1),
            (Poison, -1),
            (Ground, -1),
            (Rock, -1),
            (Ghost, -1),
            (Steel, -2),
            (Fairy, 1),
        ],
    ),
    (
        Ground,
        &[
            (Fire, 1),
            (Grass, -1),
            (Electric, 1),
            (Poison, 1),
            (Flying, -2),
            (Bug, -1),
            (Rock, 1),
            (Steel, 1),
        ],
    ),
    (
        Flying,
        &[
            (Grass, 1),
            (Electric, -1),
            (Fighting, 1),
            (Bug, 1),
            (Rock, -1),
            (Steel, -1),
        ],
    ),
    (
        Psychic,
        &[
            (Fighting, 1),
            (Poison, 1),
            (Psychic, -1),
            (Dark, -2),
            (Steel, -1),
        ],
    ),
    (
        Bug,
        &[
            (Fire, -1),
            (Grass, 1),
            (Fighting, -1),
            (Poison, -1),
            (Flying, -1),
            (Psychic, 1),
            (Ghost, -1),
            (Dark, 1),
            (Steel, -1),
            (Fairy, -1),
        ],
    ),
    (
        Rock,
        &[
            (Fire, 1),
            (Ice, 1),
            (Fighting, -1),
            (Ground, -1),
            (Flying, 1),
            (Bug, 1),
            (Steel, -1),
        ],
    ),
    (Ghost, &[(Normal, -2), (Psychic, 1), (Ghost, 1), (Dark, -1)]),
    (Dragon, &[(Dragon, 1), (Steel, -1), (Fairy, -2)]),
    (
        Dark,
        &[
            (Fighting, -1),
            (Psychic, 1),
            (Ghost, 1),
            (Dark, -1),
            (Fairy, -1),
        ],
    ),
    (
        Steel,
        &[
            (Fire, -1),
            (Water, -1),
            (Electric, -1),
            (Ice, 1),
            (Rock, 1),
            (Steel, -1),
            (Fairy, 1),
        ],
    ),
    (
        Fairy,
        &[
            (Fire, -1),
            (Fighting, 1),
            (Ground, -1),
            (Dragon, 1),
            (Dark, 1),
            (Steel, -1),
        ],
    ),
];

/// Dense lookup, `MATRIX[attacker][defender]`
pub static MATRIX: [[i8; TYPE_COUNT]; TYPE_COUNT] = build_matrix();

const fn build_matrix() -> [[i8; TYPE_COUNT]; TYPE_COUNT] {
    let mut matrix = [[NEUTRAL; TYPE_COUNT]; TYPE_COUNT];
    let mut i = 0;
    while i < CHART.len() {
        let (attacker, row) = CHART[i];
        let mut j = 0;
        while j < row.len() {
            let (defender, score) = row[j];
            matrix[attacker as usize][defender as usize] = score;
            j += 1;
        }
        i += 1;
    }
    matrix
}

/// Listed deviations for one attacking type, empty if the chart has no row for it
pub fn row(attacker: TypeLabel) -> &'static [(TypeLabel, i8)] {
    CHART
        .iter()
        .find(|(t, _)| *t == attacker)
        .map(|(_, row)| *row)
        .unwrap_or(&[])
}

/// Effectiveness of `attacker` hitting `defender`
pub fn effectiveness(attacker: TypeLabel, defender: TypeLabel) -> i8 {
    MATRIX[attacker.index()][defender.index()]
}
