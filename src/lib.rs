//! RollCall attendance data layer
//!
//! A small embedded data layer for attendance tracking: create events,
//! register attendees, mark per-event presence and review aggregated
//! history, backed by a local SQLite store. Read queries are available in
//! live (push-based) and point-in-time variants.

pub mod config;
pub mod database;
pub mod live;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, RollCallError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use live::{ChangeBus, LiveQuery, LoadState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
