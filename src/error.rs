use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(voice_scheduler::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(voice_scheduler::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(voice_scheduler::google_calendar))]
    GoogleCalendar(String),

    #[error("Google authentication failed: {0}")]
    #[diagnostic(
        code(voice_scheduler::google_auth),
        help("Check GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REFRESH_TOKEN")
    )]
    Authentication(String),

    #[error("Google Calendar quota exceeded: {0}")]
    #[diagnostic(code(voice_scheduler::quota))]
    Quota(String),

    #[error("Network error: {0}")]
    #[diagnostic(code(voice_scheduler::network))]
    Network(String),

    #[error("{0}")]
    #[diagnostic(code(voice_scheduler::schedule))]
    Schedule(String),

    #[error(transparent)]
    #[diagnostic(code(voice_scheduler::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(voice_scheduler::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(voice_scheduler::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network("request timeout".to_string())
        } else if err.is_decode() {
            Error::Serialization(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create schedule errors
pub fn schedule_error(message: &str) -> Error {
    Error::Schedule(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
