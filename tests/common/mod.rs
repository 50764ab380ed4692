#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use voice_scheduler::calendar::{CalendarService, EventDraft, EventResult};
use voice_scheduler::error::{AppResult, Error};
use voice_scheduler::server::{router, AppState};

/// How the mock provider answers
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Succeed,
    Fail(fn() -> Error),
    Panic,
}

/// Mock implementation of the calendar provider for testing
pub struct MockCalendar {
    behavior: MockBehavior,
    drafts: Mutex<Vec<EventDraft>>,
}

impl MockCalendar {
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            drafts: Mutex::new(Vec::new()),
        })
    }

    /// Drafts received so far
    pub fn drafts(&self) -> Vec<EventDraft> {
        self.drafts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarService for MockCalendar {
    async fn create_event(&self, draft: &EventDraft) -> AppResult<EventResult> {
        self.drafts.lock().unwrap().push(draft.clone());

        match self.behavior {
            MockBehavior::Succeed => Ok(EventResult {
                event_id: "mock-event-1".to_string(),
                event_link: Some("https://calendar.google.com/event?eid=mock-event-1".to_string()),
                summary: draft.summary.clone(),
                start: draft.start(),
                end: draft.end(),
            }),
            MockBehavior::Fail(make_error) => Err(make_error()),
            MockBehavior::Panic => panic!("provider exploded"),
        }
    }
}

/// Router wired to the given mock, events in Asia/Kolkata
pub fn app(calendar: Arc<MockCalendar>) -> Router {
    let state = AppState::new(calendar, chrono_tz::Asia::Kolkata);
    router(state, 16 * 1024)
}

/// Send a request and decode the JSON response body
pub async fn send(app: Router, method: Method, path: &str, body: Body) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: Router, path: &str) -> (StatusCode, Value) {
    send(app, Method::GET, path, Body::empty()).await
}

pub async fn post_json(app: Router, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/webhook/create-event",
        Body::from(body.to_string()),
    )
    .await
}
