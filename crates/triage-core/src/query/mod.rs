//! Order query engine: status filtering, tri-state sorting, tab counts.

pub mod engine;
pub mod filter;
pub mod sort;

pub use engine::{TabCounts, count_by_status, status_counts, view};
pub use filter::StatusFilter;
pub use sort::{SortColumn, SortDirection, SortState};
