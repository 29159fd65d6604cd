//! Database service layer
//!
//! This module provides the high-level interface consumed by the UI layer;
//! the UI calls these operations and never touches the store directly.

use chrono::NaiveDate;

use crate::database::repositories::{AttendanceRepository, AttendeeRepository, EventRepository};
use crate::database::DatabasePool;
use crate::live::{self, ChangeBus, LiveQuery, Table};
use crate::models::*;
use crate::utils::errors::RollCallError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub attendees: AttendeeRepository,
    pub attendance: AttendanceRepository,
    bus: ChangeBus,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        let bus = ChangeBus::default();
        Self {
            events: EventRepository::new(pool.clone(), bus.clone()),
            attendees: AttendeeRepository::new(pool.clone(), bus.clone()),
            attendance: AttendanceRepository::new(pool, bus.clone()),
            bus,
        }
    }

    /// Create a new event
    ///
    /// # Errors
    ///
    /// Returns [`RollCallError::InvalidInput`] when the name is blank; the
    /// store itself does not enforce non-empty names.
    pub async fn create_event(
        &self,
        name: String,
        date: NaiveDate,
        description: String,
    ) -> Result<Event, RollCallError> {
        if name.trim().is_empty() {
            return Err(RollCallError::InvalidInput(
                "Event name cannot be empty".to_string(),
            ));
        }

        self.events
            .create(CreateEventRequest {
                name,
                date,
                description,
            })
            .await
    }

    /// Replace an event's name, date and description
    pub async fn update_event(
        &self,
        id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event, RollCallError> {
        if request.name.trim().is_empty() {
            return Err(RollCallError::InvalidInput(
                "Event name cannot be empty".to_string(),
            ));
        }

        self.events.update(id, request).await
    }

    /// Delete an event and, via cascade, all of its attendance rows
    pub async fn delete_event(&self, id: i64) -> Result<(), RollCallError> {
        self.events.delete(id).await
    }

    /// Add an attendee to an event, creating the attendee if the student id
    /// is new; the attached attendance row starts absent
    pub async fn add_attendee_to_event(
        &self,
        request: AddAttendeeRequest,
    ) -> Result<AddAttendeeOutcome, RollCallError> {
        if request.student_id.trim().is_empty() {
            return Err(RollCallError::InvalidInput(
                "Student id cannot be empty".to_string(),
            ));
        }
        if request.full_name.trim().is_empty() {
            return Err(RollCallError::InvalidInput(
                "Full name cannot be empty".to_string(),
            ));
        }

        self.attendance.add_attendee_and_mark_attendance(request).await
    }

    /// Toggle an attendee's presence for an event
    pub async fn set_attendance_status(
        &self,
        event_id: i64,
        attendee_id: i64,
        is_present: bool,
    ) -> Result<(), RollCallError> {
        self.attendance.mark(event_id, attendee_id, is_present).await
    }

    /// Detach a single attendee from an event
    pub async fn remove_attendee_from_event(
        &self,
        event_id: i64,
        attendee_id: i64,
    ) -> Result<(), RollCallError> {
        self.attendance.delete(event_id, attendee_id).await
    }

    /// Remove all attendees from an event
    pub async fn clear_event(&self, event_id: i64) -> Result<(), RollCallError> {
        self.attendance.clear_event(event_id).await
    }

    /// Point-in-time attendance history, most recent event date first
    pub async fn attendance_history(&self) -> Result<Vec<EventHistoryEntry>, RollCallError> {
        self.attendance.history().await
    }

    /// Live list of all events, date descending
    pub fn watch_events(&self) -> LiveQuery<Vec<Event>> {
        let repo = self.events.clone();
        live::query::spawn(&self.bus, vec![Table::Events], move || {
            let repo = repo.clone();
            async move { repo.list().await }
        })
    }

    /// Live list of all attendees, full name ascending
    pub fn watch_attendees(&self) -> LiveQuery<Vec<Attendee>> {
        let repo = self.attendees.clone();
        live::query::spawn(&self.bus, vec![Table::Attendees], move || {
            let repo = repo.clone();
            async move { repo.list().await }
        })
    }

    /// Live list of the attendees attached to an event
    pub fn watch_event_attendees(&self, event_id: i64) -> LiveQuery<Vec<Attendee>> {
        let repo = self.attendees.clone();
        live::query::spawn(
            &self.bus,
            vec![Table::Attendees, Table::Attendance],
            move || {
                let repo = repo.clone();
                async move { repo.list_for_event(event_id).await }
            },
        )
    }

    /// Live list of an event's attendance rows
    pub fn watch_event_attendance(&self, event_id: i64) -> LiveQuery<Vec<Attendance>> {
        let repo = self.attendance.clone();
        live::query::spawn(&self.bus, vec![Table::Attendance], move || {
            let repo = repo.clone();
            async move { repo.list_for_event(event_id).await }
        })
    }

    /// Live present/absent counts for an event
    pub fn watch_event_summary(&self, event_id: i64) -> LiveQuery<AttendanceSummary> {
        let repo = self.attendance.clone();
        live::query::spawn(&self.bus, vec![Table::Attendance], move || {
            let repo = repo.clone();
            async move { repo.summary(event_id).await }
        })
    }

    /// Live variant of the attendance history
    pub fn watch_history(&self) -> LiveQuery<Vec<EventHistoryEntry>> {
        let repo = self.attendance.clone();
        live::query::spawn(
            &self.bus,
            vec![Table::Events, Table::Attendance],
            move || {
                let repo = repo.clone();
                async move { repo.history().await }
            },
        )
    }

    /// The change bus write paths publish on
    pub fn change_bus(&self) -> &ChangeBus {
        &self.bus
    }
}
