use super::models::{
    EventDateTime, EventInsert, EventReminders, Reminder, DEFAULT_REMINDERS,
};
use super::time::{event_window, EventWindow};
use crate::error::AppResult;
use crate::normalizer::NormalizedRequest;
use chrono_tz::Tz;

/// Event ready to be sent to the calendar provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub summary: String,
    pub description: String,
    pub window: EventWindow,
    pub time_zone: Tz,
    pub reminders: Vec<Reminder>,
}

impl EventDraft {
    /// Build the event for a validated request in the given time zone
    pub fn from_request(request: &NormalizedRequest, time_zone: Tz) -> AppResult<Self> {
        let window = event_window(&request.date, &request.time, time_zone)?;

        Ok(Self {
            summary: summary_for(request),
            description: format!("Scheduled meeting with {}", request.name),
            window,
            time_zone,
            reminders: DEFAULT_REMINDERS.to_vec(),
        })
    }

    /// Start as a local date-time string
    pub fn start(&self) -> String {
        self.window.start_string()
    }

    /// End as a local date-time string
    pub fn end(&self) -> String {
        self.window.end_string()
    }

    /// Request body for the Google Calendar `events.insert` call
    pub fn to_insert(&self) -> EventInsert {
        let at = |date_time: String| EventDateTime {
            date_time: Some(date_time),
            date: None,
            time_zone: Some(self.time_zone.name().to_string()),
        };

        EventInsert {
            summary: self.summary.clone(),
            description: self.description.clone(),
            start: at(self.start()),
            end: at(self.end()),
            attendees: Vec::new(),
            reminders: EventReminders {
                use_default: false,
                overrides: self.reminders.clone(),
            },
        }
    }
}

/// The title if one was given, otherwise `Meeting with <name>`
pub fn summary_for(request: &NormalizedRequest) -> String {
    match request.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => format!("Meeting with {}", request.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(time: &str, title: Option<&str>) -> NormalizedRequest {
        NormalizedRequest {
            name: "Eve".to_string(),
            date: "2025-03-10".to_string(),
            time: time.to_string(),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary_for(&request("10:00", Some("Kickoff"))), "Kickoff");
        assert_eq!(summary_for(&request("10:00", None)), "Meeting with Eve");
        assert_eq!(summary_for(&request("10:00", Some(""))), "Meeting with Eve");
    }

    #[test]
    fn test_draft_rolls_over_midnight() {
        let draft = EventDraft::from_request(&request("23:30", None), chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(draft.start(), "2025-03-10T23:30:00");
        assert_eq!(draft.end(), "2025-03-11T00:30:00");
        assert_eq!(draft.description, "Scheduled meeting with Eve");
    }

    #[test]
    fn test_draft_rejects_out_of_range_time() {
        let result = EventDraft::from_request(&request("25:00", None), chrono_tz::UTC);
        assert!(matches!(result, Err(crate::error::Error::Schedule(_))));
    }

    #[test]
    fn test_insert_body() {
        let draft = EventDraft::from_request(&request("09:30", Some("Kickoff")), chrono_tz::Asia::Kolkata).unwrap();
        let body = serde_json::to_value(draft.to_insert()).unwrap();
        assert_eq!(
            body,
            json!({
                "summary": "Kickoff",
                "description": "Scheduled meeting with Eve",
                "start": {"dateTime": "2025-03-10T09:30:00", "timeZone": "Asia/Kolkata"},
                "end": {"dateTime": "2025-03-10T10:30:00", "timeZone": "Asia/Kolkata"},
                "attendees": [],
                "reminders": {
                    "useDefault": false,
                    "overrides": [
                        {"method": "email", "minutes": 1440},
                        {"method": "popup", "minutes": 30}
                    ]
                }
            })
        );
    }
}
