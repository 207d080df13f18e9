//! Tick: a lightning-fast local task tracker.
//!
//! Tick persists an ordered collection of small integer-id tasks in a
//! single JSON document and layers querying, searching, and statistics on
//! top. The store is the whole API surface; the bundled CLI is just one
//! consumer of it.
//!
//! # Example
//!
//! ```no_run
//! use tick::{Priority, Storage, Store};
//!
//! let mut store = Store::new(Storage::new("/tmp/tick/tasks.json"));
//!
//! let task = store.add("Write the changelog", Priority::High, &[]).unwrap();
//! store.complete(task.id).unwrap();
//!
//! let active = store.list(false).unwrap();
//! assert!(active.is_empty());
//! ```

mod query;
mod report;
mod stats;
mod storage;
mod store;
mod types;

pub mod backup;
pub mod config;

// Re-export public API
pub use query::TaskFilter;
pub use report::ReportFormat;
pub use stats::{DetailedStats, PriorityBreakdown, Stats};
pub use storage::{Collection, Storage};
pub use store::{BatchOutcome, ClearScope, Store, StoreError, parse_priority};
pub use types::{Priority, Task, TaskPatch, normalize_tags};
