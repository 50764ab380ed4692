use serde::{Deserialize, Serialize};

/// Event created by the calendar provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResult {
    pub event_id: String,
    pub event_link: Option<String>,
    pub summary: String,
    pub start: String,
    pub end: String,
}

/// Reminder delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderMethod {
    Email,
    Popup,
}

/// A reminder override on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub method: ReminderMethod,
    pub minutes: u32,
}

/// Reminders attached to every created event: email a day before, popup 30 minutes before
pub const DEFAULT_REMINDERS: [Reminder; 2] = [
    Reminder {
        method: ReminderMethod::Email,
        minutes: 24 * 60,
    },
    Reminder {
        method: ReminderMethod::Popup,
        minutes: 30,
    },
];

/// Wire format of `events.insert` request bodies
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInsert {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    pub attendees: Vec<serde_json::Value>,
    pub reminders: EventReminders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// The date-time if present, otherwise the all-day date
    pub fn value(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReminders {
    pub use_default: bool,
    pub overrides: Vec<Reminder>,
}

/// Subset of the Google Calendar event resource returned by `events.insert`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedEvent {
    pub id: String,
    pub html_link: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventDateTime,
    #[serde(default)]
    pub end: EventDateTime,
}
