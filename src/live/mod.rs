//! Live query support
//!
//! Write paths publish table-change notices on a broadcast bus; live queries
//! subscribe and re-run themselves whenever a table they depend on changes,
//! pushing fresh results to watchers.

pub mod change_bus;
pub mod query;

pub use change_bus::{ChangeBus, Table};
pub use query::{LiveQuery, LoadState};
