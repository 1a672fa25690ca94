pub mod batch;
pub mod cli;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod schema;
pub mod source;
pub mod types;
pub mod ui;
pub mod writer;

pub use batch::{Batch, BatchId, TeamMember};
pub use cli::{Cli, Commands};
pub use error::RosterError;
pub use pipeline::{import_roster, process_table, read_roster};
pub use types::{MatchupProfile, TypeLabel};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
