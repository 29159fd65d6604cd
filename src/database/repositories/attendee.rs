//! Attendee repository implementation

use sqlx::SqlitePool;

use crate::live::{ChangeBus, Table};
use crate::models::attendee::{Attendee, CreateAttendeeRequest};
use crate::utils::errors::{is_unique_violation, RollCallError};

#[derive(Debug, Clone)]
pub struct AttendeeRepository {
    pool: SqlitePool,
    bus: ChangeBus,
}

impl AttendeeRepository {
    pub fn new(pool: SqlitePool, bus: ChangeBus) -> Self {
        Self { pool, bus }
    }

    /// Create a new attendee
    ///
    /// # Errors
    ///
    /// Returns [`RollCallError::DuplicateStudentId`] when the student id is
    /// already registered; the store enforces global uniqueness.
    pub async fn create(&self, request: CreateAttendeeRequest) -> Result<Attendee, RollCallError> {
        let attendee = sqlx::query_as::<_, Attendee>(
            r#"
            INSERT INTO attendees (student_id, full_name, course, year_level)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, full_name, course, year_level
            "#,
        )
        .bind(&request.student_id)
        .bind(&request.full_name)
        .bind(&request.course)
        .bind(request.year_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                RollCallError::DuplicateStudentId {
                    student_id: request.student_id.clone(),
                }
            } else {
                err.into()
            }
        })?;

        tracing::debug!(attendee_id = attendee.id, student_id = %attendee.student_id, "Attendee created");
        self.bus.publish(Table::Attendees);
        Ok(attendee)
    }

    /// Find attendee by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Attendee>, RollCallError> {
        let attendee = sqlx::query_as::<_, Attendee>(
            "SELECT id, student_id, full_name, course, year_level FROM attendees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    /// Find attendee by student ID (exact match)
    pub async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Attendee>, RollCallError> {
        let attendee = sqlx::query_as::<_, Attendee>(
            "SELECT id, student_id, full_name, course, year_level FROM attendees WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(attendee)
    }

    /// List all attendees ordered by full name, identifier as tie-break
    pub async fn list(&self) -> Result<Vec<Attendee>, RollCallError> {
        let attendees = sqlx::query_as::<_, Attendee>(
            "SELECT id, student_id, full_name, course, year_level FROM attendees ORDER BY full_name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }

    /// Get attendees attached to an event via its attendance rows
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<Attendee>, RollCallError> {
        let attendees = sqlx::query_as::<_, Attendee>(
            r#"
            SELECT at.id, at.student_id, at.full_name, at.course, at.year_level
            FROM attendees at
            INNER JOIN attendance a ON at.id = a.attendee_id
            WHERE a.event_id = $1
            ORDER BY at.full_name ASC, at.id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }

    /// Count total attendees
    pub async fn count(&self) -> Result<i64, RollCallError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
