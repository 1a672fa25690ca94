pub mod chart;
pub mod matchup;

pub use chart::{effectiveness, TypeLabel, TYPE_COUNT};
pub use matchup::{MatchupProfile, TypeScores};
