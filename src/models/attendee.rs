//! Attendee model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person identified by a globally unique student id, attachable to any
/// number of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Attendee {
    pub id: i64,
    pub student_id: String,
    pub full_name: String,
    pub course: Option<String>,
    /// By convention 1 through 4; not enforced at storage
    pub year_level: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAttendeeRequest {
    pub student_id: String,
    pub full_name: String,
    pub course: Option<String>,
    pub year_level: Option<i32>,
}
