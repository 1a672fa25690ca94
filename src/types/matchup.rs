//! Offensive and defensive matchup profiles for a resolved pair of types.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;

use super::chart::{self, TypeLabel, NEUTRAL, TYPE_COUNT};

/// Lower bound for aggregated defensive scores
pub const DEFENSIVE_MIN: i8 = -2;
/// Upper bound for aggregated defensive scores
pub const DEFENSIVE_MAX: i8 = 2;

/// One score per type label, always complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeScores([i8; TYPE_COUNT]);

impl TypeScores {
    pub fn neutral() -> Self {
        Self([NEUTRAL; TYPE_COUNT])
    }

    pub fn get(&self, label: TypeLabel) -> i8 {
        self.0[label.index()]
    }

    fn set(&mut self, label: TypeLabel, score: i8) {
        self.0[label.index()] = score;
    }

    /// Pairs in canonical label order
    pub fn iter(&self) -> impl Iterator<Item = (TypeLabel, i8)> + '_ {
        TypeLabel::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}

impl Default for TypeScores {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Index<TypeLabel> for TypeScores {
    type Output = i8;

    fn index(&self, label: TypeLabel) -> &i8 {
        &self.0[label.index()]
    }
}

impl Serialize for TypeScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TYPE_COUNT))?;
        for (label, score) in self.iter() {
            map.serialize_entry(label.as_str(), &score)?;
        }
        map.end()
    }
}

/// Derived effectiveness profile of one team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MatchupProfile {
    /// This member's types attacking each type (best of both types)
    pub offensive: TypeScores,
    /// Each type attacking this member (summed over both types, clamped)
    pub defensive: TypeScores,
}

impl MatchupProfile {
    /// Compute the profile for a resolved primary type and optional secondary type.
    ///
    /// Labels outside the chart are accepted and contribute nothing, leaving neutral scores.
    pub fn calculate(type1: &str, type2: Option<&str>) -> Self {
        let primary = TypeLabel::parse(type1);
        let secondary = type2.and_then(TypeLabel::parse);

        if primary.is_none() {
            log::warn!("Type '{}' is not in the chart, using neutral matchups", type1);
        }
        if let (Some(t), None) = (type2, secondary) {
            log::warn!("Type '{}' is not in the chart, using neutral matchups", t);
        }

        Self::from_labels(primary, secondary)
    }

    pub fn from_labels(primary: Option<TypeLabel>, secondary: Option<TypeLabel>) -> Self {
        Self {
            offensive: offensive_scores(primary, secondary),
            defensive: defensive_scores(primary, secondary),
        }
    }
}

/// The primary type's chart row is taken as-is; the secondary type only raises scores.
fn offensive_scores(primary: Option<TypeLabel>, secondary: Option<TypeLabel>) -> TypeScores {
    let mut scores = TypeScores::neutral();

    if let Some(attacker) = primary {
        for &(defender, score) in chart::row(attacker) {
            scores.set(defender, score);
        }
    }

    if let Some(attacker) = secondary {
        for &(defender, score) in chart::row(attacker) {
            if score > scores.get(defender) {
                scores.set(defender, score);
            }
        }
    }

    scores
}

/// Each own type subtracts its column of the chart. A repeated type is subtracted twice.
fn defensive_scores(primary: Option<TypeLabel>, secondary: Option<TypeLabel>) -> TypeScores {
    let mut scores = TypeScores::neutral();

    for attacker in TypeLabel::ALL {
        let mut total: i8 = 0;
        for own in [primary, secondary].into_iter().flatten() {
            total -= chart::effectiveness(attacker, own);
        }
        scores.set(attacker, total.clamp(DEFENSIVE_MIN, DEFENSIVE_MAX));
    }

    scores
}
