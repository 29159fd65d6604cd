//! Attendance model and derived read models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The per-(event, attendee) presence record.
///
/// At most one row exists per (event_id, attendee_id) pair; deleting either
/// parent cascades delete of the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub event_id: i64,
    pub attendee_id: i64,
    pub is_present: bool,
    /// Wall-clock at last write; refreshed on every re-mark
    pub marked_at: DateTime<Utc>,
}

/// Present/absent counts for a single event. Computed fresh, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AttendanceSummary {
    pub present_count: i64,
    pub absent_count: i64,
}

/// One row of the attendance history: an event joined with its aggregated
/// attendance counts. Events with no attendance rows do not appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventHistoryEntry {
    pub event_id: i64,
    pub event_name: String,
    pub description: String,
    pub date: NaiveDate,
    pub total: i64,
    pub present: i64,
    pub absent: i64,
}

/// Input to the add-attendee-to-event workflow.
///
/// Carries no presence flag: a freshly attached attendance row always starts
/// absent and is flipped by a later explicit status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddAttendeeRequest {
    pub event_id: i64,
    pub student_id: String,
    pub full_name: String,
    pub course: Option<String>,
    pub year_level: Option<i32>,
}

/// Outcome tag of the add-attendee-to-event workflow, so callers can
/// distinguish "added new student" from "existing student added to event".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddAttendeeOutcome {
    /// A new attendee row was created for the supplied student id
    New,
    /// The student id already existed; its attendee row was reused as-is
    Existing,
}
