use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::any::Any;
use tracing::{debug, error, info};

use super::responses::{
    ErrorResponse, HealthResponse, IndexResponse, NotFoundResponse, SuccessResponse, ENDPOINTS,
};
use super::AppState;
use crate::calendar::EventDraft;
use crate::normalizer::{normalize, Rejection, RequestError};

/// Handler for API health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Voice Scheduling Backend is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Handler for the index, lists the available endpoints
pub async fn index_handler() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Voice Scheduling Backend API",
        endpoints: ENDPOINTS,
    })
}

/// Handler for unknown routes
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Endpoint not found",
            available_endpoints: ENDPOINTS,
        }),
    )
        .into_response()
}

/// Webhook handler that creates a calendar event from a tool call
pub async fn create_event_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    info!("Webhook request received");

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("Failed to read request body: {}", rejection.body_text());
            return ErrorResponse::new(rejection.body_text()).with_status(rejection.status());
        }
    };

    let envelope = match parse_body(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            error!("Request body is not valid JSON: {}", e);
            return ErrorResponse::new("Invalid JSON body").with_status(StatusCode::BAD_REQUEST);
        }
    };
    debug!(body = %envelope, "Full request body");

    let normalized = match normalize(&envelope) {
        Ok(normalized) => normalized,
        Err(rejection) => return rejection_response(rejection, envelope),
    };
    let tool_call_id = normalized.tool_call_id;
    let request = normalized.request;

    info!("All validations passed. Creating calendar event...");

    let result = match EventDraft::from_request(&request, state.time_zone) {
        Ok(draft) => state.calendar.create_event(&draft).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(event) => {
            info!(
                event_id = %event.event_id,
                event_link = ?event.event_link,
                "Calendar event created successfully"
            );
            (StatusCode::OK, Json(SuccessResponse::new(&request.name, event))).into_response()
        }
        Err(e) => {
            // The tool call protocol expects a 200 even when the provider fails
            error!("Failed to create calendar event: {}", e);
            ErrorResponse::new(e.to_string())
                .with_tool_call_id(tool_call_id)
                .with_status(StatusCode::OK)
        }
    }
}

/// Parse the raw body, an empty body is treated as an empty object
fn parse_body(body: &[u8]) -> Result<Value, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body)
}

fn rejection_response(rejection: Rejection, envelope: Value) -> Response {
    let response = ErrorResponse::new(rejection.error.to_string()).with_tool_call_id(rejection.tool_call_id);
    let response = match rejection.error {
        RequestError::UnknownFormat => response.with_received_body(envelope),
        _ => response,
    };
    response.with_status(StatusCode::BAD_REQUEST)
}

/// Turn a panic inside a handler into a JSON 500
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };
    error!("Handler panicked: {}", detail);

    ErrorResponse::new("Failed to create calendar event").with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
