use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::calendar::EventResult;

/// Route paths advertised by `/` and the 404 handler
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub health: &'static str,
    pub create_event: &'static str,
}

pub const ENDPOINTS: Endpoints = Endpoints {
    health: "/health",
    create_event: "/webhook/create-event",
};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub available_endpoints: Endpoints,
}

/// Created event as reported back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: String,
    pub link: Option<String>,
    pub summary: String,
    pub start: String,
    pub end: String,
}

impl From<EventResult> for EventSummary {
    fn from(result: EventResult) -> Self {
        Self {
            id: result.event_id,
            link: result.event_link,
            summary: result.summary,
            start: result.start,
            end: result.end,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
    pub event: EventSummary,
}

impl SuccessResponse {
    pub fn new(name: &str, result: EventResult) -> Self {
        Self {
            success: true,
            message: format!("Calendar event created successfully for {}", name),
            event: result.into(),
        }
    }
}

/// Body of every handled webhook failure
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(rename = "receivedBody", skip_serializing_if = "Option::is_none")]
    pub received_body: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            tool_call_id: None,
            received_body: None,
        }
    }

    pub fn with_tool_call_id(mut self, tool_call_id: Option<String>) -> Self {
        self.tool_call_id = tool_call_id;
        self
    }

    pub fn with_received_body(mut self, body: Value) -> Self {
        self.received_body = Some(body);
        self
    }

    /// Pair the body with a status code
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
