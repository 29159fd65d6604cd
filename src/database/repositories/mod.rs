//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod attendance;
pub mod attendee;
pub mod event;

// Re-export repositories
pub use attendance::AttendanceRepository;
pub use attendee::AttendeeRepository;
pub use event::EventRepository;
