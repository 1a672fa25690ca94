pub mod fields;
pub mod record;
pub mod resolve;
pub mod table;

pub use fields::{Field, CANONICAL_FIELDS};
pub use record::{normalize_row, normalize_table, title_case, to_table, ColumnMap, NormalizedRecord, Stats};
pub use resolve::{resolve_types, FALLBACK_TYPE};
pub use table::{CellValue, InputFormat, RawTable};
