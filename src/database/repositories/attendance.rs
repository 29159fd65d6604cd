//! Attendance repository implementation
//!
//! Holds the one multi-statement transaction in the system: the
//! add-attendee-to-event workflow, which finds-or-creates an attendee and
//! attaches an attendance row atomically.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::live::{ChangeBus, Table};
use crate::models::attendance::{
    AddAttendeeOutcome, AddAttendeeRequest, Attendance, AttendanceSummary, EventHistoryEntry,
};
use crate::models::attendee::Attendee;
use crate::utils::errors::{is_foreign_key_violation, is_unique_violation, RollCallError};

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
    bus: ChangeBus,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool, bus: ChangeBus) -> Self {
        Self { pool, bus }
    }

    /// Insert or replace the attendance row for (event, attendee)
    ///
    /// Keyed by the composite primary key; `marked_at` is refreshed on every
    /// call, including re-marks with the same presence flag.
    ///
    /// # Errors
    ///
    /// Returns [`RollCallError::ForeignKey`] when either parent id does not
    /// exist.
    pub async fn mark(
        &self,
        event_id: i64,
        attendee_id: i64,
        is_present: bool,
    ) -> Result<(), RollCallError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO attendance (event_id, attendee_id, is_present, marked_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event_id)
        .bind(attendee_id)
        .bind(is_present)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| map_foreign_key(err, event_id, attendee_id))?;

        tracing::debug!(event_id, attendee_id, is_present, "Attendance marked");
        self.bus.publish(Table::Attendance);
        Ok(())
    }

    /// Get all attendance rows for an event
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<Attendance>, RollCallError> {
        let rows = sqlx::query_as::<_, Attendance>(
            "SELECT event_id, attendee_id, is_present, marked_at FROM attendance WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Find the attendance row for a single (event, attendee) pair
    pub async fn find(
        &self,
        event_id: i64,
        attendee_id: i64,
    ) -> Result<Option<Attendance>, RollCallError> {
        let row = sqlx::query_as::<_, Attendance>(
            "SELECT event_id, attendee_id, is_present, marked_at FROM attendance WHERE event_id = $1 AND attendee_id = $2",
        )
        .bind(event_id)
        .bind(attendee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Delete a single attendance row; no-op if the row does not exist
    pub async fn delete(&self, event_id: i64, attendee_id: i64) -> Result<(), RollCallError> {
        sqlx::query("DELETE FROM attendance WHERE event_id = $1 AND attendee_id = $2")
            .bind(event_id)
            .bind(attendee_id)
            .execute(&self.pool)
            .await?;

        self.bus.publish(Table::Attendance);
        Ok(())
    }

    /// Delete a batch of attendance rows in one transaction
    pub async fn delete_many(&self, rows: &[(i64, i64)]) -> Result<(), RollCallError> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for (event_id, attendee_id) in rows {
            sqlx::query("DELETE FROM attendance WHERE event_id = $1 AND attendee_id = $2")
                .bind(event_id)
                .bind(attendee_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        self.bus.publish(Table::Attendance);
        Ok(())
    }

    /// Remove every attendance row for an event
    pub async fn clear_event(&self, event_id: i64) -> Result<(), RollCallError> {
        sqlx::query("DELETE FROM attendance WHERE event_id = $1")
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(event_id, "Attendance cleared for event");
        self.bus.publish(Table::Attendance);
        Ok(())
    }

    /// Present/absent counts for an event, zero for an event with no rows
    pub async fn summary(&self, event_id: i64) -> Result<AttendanceSummary, RollCallError> {
        let summary = sqlx::query_as::<_, AttendanceSummary>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN is_present = 1 THEN 1 ELSE 0 END), 0) AS present_count,
                COALESCE(SUM(CASE WHEN is_present = 0 THEN 1 ELSE 0 END), 0) AS absent_count
            FROM attendance
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Attendance history: every event that has attendance rows, with its
    /// aggregated counts, most recent date first
    pub async fn history(&self) -> Result<Vec<EventHistoryEntry>, RollCallError> {
        let entries = sqlx::query_as::<_, EventHistoryEntry>(
            r#"
            SELECT
                e.id AS event_id,
                e.name AS event_name,
                e.description AS description,
                e.date AS date,
                COUNT(a.attendee_id) AS total,
                COALESCE(SUM(CASE WHEN a.is_present = 1 THEN 1 ELSE 0 END), 0) AS present,
                COALESCE(SUM(CASE WHEN a.is_present = 0 THEN 1 ELSE 0 END), 0) AS absent
            FROM attendance a
            INNER JOIN events e ON a.event_id = e.id
            GROUP BY e.id
            ORDER BY e.date DESC, e.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Find-or-create an attendee by student id and attach an attendance row
    /// to the event, all in one transaction.
    ///
    /// When the student id already exists, its attendee row is reused as-is:
    /// the supplied name, course and year level are discarded. The attached
    /// attendance row always starts absent; presence is a later explicit
    /// [`mark`](Self::mark) call.
    ///
    /// Two concurrent callers racing on the same new student id both succeed:
    /// the insert loser detects the uniqueness violation and falls back to
    /// the `Existing` path.
    pub async fn add_attendee_and_mark_attendance(
        &self,
        request: AddAttendeeRequest,
    ) -> Result<AddAttendeeOutcome, RollCallError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Attendee>(
            "SELECT id, student_id, full_name, course, year_level FROM attendees WHERE student_id = $1",
        )
        .bind(&request.student_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (attendee_id, outcome) = match existing {
            Some(attendee) => (attendee.id, AddAttendeeOutcome::Existing),
            None => {
                let inserted: Result<(i64,), sqlx::Error> = sqlx::query_as(
                    r#"
                    INSERT INTO attendees (student_id, full_name, course, year_level)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    "#,
                )
                .bind(&request.student_id)
                .bind(&request.full_name)
                .bind(&request.course)
                .bind(request.year_level)
                .fetch_one(&mut *tx)
                .await;

                match inserted {
                    Ok((id,)) => (id, AddAttendeeOutcome::New),
                    Err(err) if is_unique_violation(&err) => {
                        // Lost an insert race; the row exists now
                        let attendee = sqlx::query_as::<_, Attendee>(
                            "SELECT id, student_id, full_name, course, year_level FROM attendees WHERE student_id = $1",
                        )
                        .bind(&request.student_id)
                        .fetch_one(&mut *tx)
                        .await?;
                        (attendee.id, AddAttendeeOutcome::Existing)
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO attendance (event_id, attendee_id, is_present, marked_at)
            VALUES ($1, $2, 0, $3)
            "#,
        )
        .bind(request.event_id)
        .bind(attendee_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|err| map_foreign_key(err, request.event_id, attendee_id))?;

        tx.commit().await?;

        tracing::info!(
            event_id = request.event_id,
            attendee_id,
            student_id = %request.student_id,
            outcome = ?outcome,
            "Attendee attached to event"
        );

        if outcome == AddAttendeeOutcome::New {
            self.bus.publish(Table::Attendees);
        }
        self.bus.publish(Table::Attendance);

        Ok(outcome)
    }
}

fn map_foreign_key(err: sqlx::Error, event_id: i64, attendee_id: i64) -> RollCallError {
    if is_foreign_key_violation(&err) {
        RollCallError::ForeignKey(format!(
            "attendance ({event_id}, {attendee_id}) references a missing event or attendee"
        ))
    } else {
        err.into()
    }
}
