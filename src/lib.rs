/// GridView - In-Memory Data-View Engine
///
/// A deterministic state machine for tabular record data: load raw records
/// and a column-key sequence, then drive the view with commands (free-text
/// filter, sort-by-column, page navigation, page-size changes, incremental
/// adds) and read it back as an owned snapshot. Rendering, styling and event
/// wiring are left to the caller; the engine only ever deals in data.

pub mod engine;
pub mod error;
pub mod filter;
pub mod layout;
pub mod page;
pub mod record;
pub mod sort;

pub use engine::{GridConfig, GridEngine, ViewSnapshot};
pub use error::GridError;
pub use filter::{FilterSpec, RecordMatcher};
pub use layout::compute_column_widths;
pub use page::{total_pages, PageWindow};
pub use record::{CellValue, RawRecord, Record};
pub use sort::{comparator, SortSpec};
