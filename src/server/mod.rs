mod handlers;
pub mod responses;

pub use handlers::{
    create_event_handler, handle_panic, health_handler, index_handler, not_found_handler,
};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::calendar::CalendarService;

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    /// Provider that creates the events
    pub calendar: Arc<dyn CalendarService>,
    /// Time zone event times are interpreted in
    pub time_zone: Tz,
}

impl AppState {
    pub fn new(calendar: Arc<dyn CalendarService>, time_zone: Tz) -> Self {
        Self {
            calendar,
            time_zone,
        }
    }
}

/// Build the router with all routes and middleware
pub fn router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index_handler).fallback(not_found_handler))
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route(
            "/webhook/create-event",
            post(create_event_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
