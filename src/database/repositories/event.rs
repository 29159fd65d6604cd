//! Event repository implementation

use chrono::Utc;
use sqlx::SqlitePool;

use crate::live::{ChangeBus, Table};
use crate::models::event::{CreateEventRequest, Event, UpdateEventRequest};
use crate::utils::errors::RollCallError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: SqlitePool,
    bus: ChangeBus,
}

impl EventRepository {
    pub fn new(pool: SqlitePool, bus: ChangeBus) -> Self {
        Self { pool, bus }
    }

    /// Create a new event
    ///
    /// The identifier and creation timestamp are assigned by the store.
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, RollCallError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, date, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, date, description, created_at
            "#,
        )
        .bind(request.name)
        .bind(request.date)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(event_id = event.id, "Event created");
        self.bus.publish(Table::Events);
        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, RollCallError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, date, description, created_at FROM events WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event
    ///
    /// Full-row replace of the mutable fields; the identifier and creation
    /// timestamp are immutable.
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, RollCallError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name = $2,
                date = $3,
                description = $4
            WHERE id = $1
            RETURNING id, name, date, description, created_at
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.date)
        .bind(request.description)
        .fetch_one(&self.pool)
        .await?;

        self.bus.publish(Table::Events);
        Ok(event)
    }

    /// Delete event
    ///
    /// Cascades to every attendance row referencing it; irreversible.
    pub async fn delete(&self, id: i64) -> Result<(), RollCallError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(event_id = id, "Event deleted");
        self.bus.publish(Table::Events);
        self.bus.publish(Table::Attendance);
        Ok(())
    }

    /// List all events, most recent date first
    pub async fn list(&self) -> Result<Vec<Event>, RollCallError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, name, date, description, created_at FROM events ORDER BY date DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, RollCallError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
