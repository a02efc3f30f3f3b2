//! Tabular data view: declarative columns, single-column sort with a
//! descending-first toggle cycle, client- or server-side pagination,
//! live column resizing and a buffer renderer with hit testing.

mod column;
mod page;
mod render;
mod sort;
mod state;

pub use column::{CellValue, Column};
pub use page::PageState;
pub use render::{draw, handle_event, hit_test, TableHit};
pub use sort::{SortKey, SortState};
pub use state::{Mode, PageRequest, TableState};
