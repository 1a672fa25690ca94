pub mod reader;
pub mod schema_gen;
pub mod sqlite;

pub use reader::{list_batches, load_batch, BatchSummary, StoredBatch, StoredMatchup, StoredMember};
pub use schema_gen::*;
pub use sqlite::SqliteWriter;

use crate::batch::Batch;
use crate::error::Result;

/// Destination for processed batches.
///
/// Implementations own schema creation and insertion order, and must store a batch
/// completely or not at all. Returns the number of members stored.
pub trait PersistenceAdapter {
    fn persist(&mut self, batch: &Batch) -> Result<usize>;
}
