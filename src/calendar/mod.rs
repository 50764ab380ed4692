mod client;
mod draft;
pub mod models;
pub mod time;
pub mod token;

pub use client::{classify_failure, GoogleCalendarClient};
pub use draft::{summary_for, EventDraft};
pub use models::EventResult;

use crate::error::AppResult;
use async_trait::async_trait;

/// Calendar provider that can create events
#[async_trait]
pub trait CalendarService: Send + Sync + 'static {
    /// Create the event and return what the provider stored
    async fn create_event(&self, draft: &EventDraft) -> AppResult<EventResult>;
}
