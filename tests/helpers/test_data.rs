//! Test data helpers for creating request objects

use chrono::NaiveDate;

use rollcall::models::{AddAttendeeRequest, CreateAttendeeRequest, CreateEventRequest};

/// Event request with a fixed date, for deterministic ordering assertions
pub fn event_request(name: &str, date: &str) -> CreateEventRequest {
    CreateEventRequest {
        name: name.to_string(),
        date: parse_date(date),
        description: format!("{} description", name),
    }
}

pub fn attendee_request(student_id: &str, full_name: &str) -> CreateAttendeeRequest {
    CreateAttendeeRequest {
        student_id: student_id.to_string(),
        full_name: full_name.to_string(),
        course: Some("BSCS".to_string()),
        year_level: Some(1),
    }
}

pub fn add_request(event_id: i64, student_id: &str, full_name: &str) -> AddAttendeeRequest {
    AddAttendeeRequest {
        event_id,
        student_id: student_id.to_string(),
        full_name: full_name.to_string(),
        course: None,
        year_level: None,
    }
}

pub fn parse_date(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}
