//! Event model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tracked occasion with a calendar date, on which attendance is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    /// Calendar date only, stored as ISO-8601 `YYYY-MM-DD`
    pub date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
}

/// Full-row replacement of an event's mutable fields.
///
/// There are no partial-update semantics: every field is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
}
