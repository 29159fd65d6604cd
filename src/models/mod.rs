//! Data models module
//!
//! This module contains all data structures used throughout the data layer

pub mod attendance;
pub mod attendee;
pub mod event;

// Re-export commonly used models
pub use attendance::{
    AddAttendeeOutcome, AddAttendeeRequest, Attendance, AttendanceSummary, EventHistoryEntry,
};
pub use attendee::{Attendee, CreateAttendeeRequest};
pub use event::{CreateEventRequest, Event, UpdateEventRequest};
