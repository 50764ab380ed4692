use super::draft::EventDraft;
use super::models::{EventResult, InsertedEvent};
use super::token::TokenManager;
use super::CalendarService;
use crate::config::Config;
use crate::error::{google_calendar_error, AppResult, Error};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{error, info};
use url::Url;

/// Base URL for Google Calendar API v3
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3/";

/// Google Calendar implementation of [`CalendarService`]
#[derive(Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    token_manager: TokenManager,
    calendar_id: String,
}

impl GoogleCalendarClient {
    /// Create a client for the configured calendar
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.calendar_call_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| google_calendar_error(&format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token_manager: TokenManager::new(config, client.clone()),
            client,
            calendar_id: config.google_calendar_id.clone(),
        })
    }

    /// Events collection URL of the target calendar
    pub fn events_url(&self) -> AppResult<Url> {
        let mut url = Url::parse(CALENDAR_API_BASE)
            .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| google_calendar_error("Calendar API base cannot have a path"))?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);
        Ok(url)
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn create_event(&self, draft: &EventDraft) -> AppResult<EventResult> {
        info!(
            title = %draft.summary,
            start = %draft.start(),
            end = %draft.end(),
            "Creating calendar event"
        );

        let access_token = self.token_manager.access_token().await?;
        let url = self.events_url()?;

        let response = self
            .client
            .post(url)
            .bearer_auth(access_token)
            .json(&draft.to_insert())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            let err = classify_failure(status, &error_body);
            error!("Error creating calendar event: {}", err);
            return Err(err);
        }

        let inserted: InsertedEvent = response.json().await?;
        info!(event_id = %inserted.id, "Event created successfully");

        Ok(to_result(inserted, draft))
    }
}

/// Map a failed insert response to an error kind
pub fn classify_failure(status: StatusCode, body: &str) -> Error {
    let detail = format!("HTTP {} - {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED => Error::Authentication(detail),
        StatusCode::TOO_MANY_REQUESTS => Error::Quota(detail),
        StatusCode::FORBIDDEN if is_quota_reason(body) => Error::Quota(detail),
        StatusCode::FORBIDDEN => Error::Authentication(detail),
        StatusCode::BAD_REQUEST => google_calendar_error(&format!("Malformed event request: {}", detail)),
        _ => google_calendar_error(&format!("Failed to create event: {}", detail)),
    }
}

fn is_quota_reason(body: &str) -> bool {
    ["rateLimitExceeded", "userRateLimitExceeded", "quotaExceeded"]
        .iter()
        .any(|reason| body.contains(reason))
}

/// Fill anything the provider left out from the draft
fn to_result(inserted: InsertedEvent, draft: &EventDraft) -> EventResult {
    EventResult {
        start: inserted
            .start
            .value()
            .map(str::to_string)
            .unwrap_or_else(|| draft.start()),
        end: inserted
            .end
            .value()
            .map(str::to_string)
            .unwrap_or_else(|| draft.end()),
        summary: inserted.summary.unwrap_or_else(|| draft.summary.clone()),
        event_link: inserted.html_link,
        event_id: inserted.id,
    }
}
