use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Calendar used when GOOGLE_CALENDAR_ID is not set
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Time zone used when TIMEZONE is not set
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;

/// Default request body limit (100 KiB)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Main configuration structure for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Long-lived refresh token used to mint access tokens
    pub google_refresh_token: String,
    /// Calendar that receives the created events
    pub google_calendar_id: String,
    /// IANA time zone the event times are expressed in
    pub timezone: String,
    /// Address to bind the HTTP server to
    pub host: String,
    /// Port to bind the HTTP server to
    pub port: u16,
    /// Timeout for calls to the calendar provider, no timeout when unset
    pub calendar_call_timeout_ms: Option<u64>,
    /// Maximum accepted request body size
    pub body_limit_bytes: usize,
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present)
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let google_client_id = required("GOOGLE_CLIENT_ID")?;
        let google_client_secret = required("GOOGLE_CLIENT_SECRET")?;
        let google_refresh_token = required("GOOGLE_REFRESH_TOKEN")?;

        let google_calendar_id =
            env::var("GOOGLE_CALENDAR_ID").unwrap_or_else(|_| DEFAULT_CALENDAR_ID.to_string());
        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = parse_var("PORT", env::var("PORT").ok())?.unwrap_or(DEFAULT_PORT);
        let calendar_call_timeout_ms = parse_var(
            "CALENDAR_CALL_TIMEOUT_MS",
            env::var("CALENDAR_CALL_TIMEOUT_MS").ok(),
        )?;
        let body_limit_bytes = parse_var("BODY_LIMIT_BYTES", env::var("BODY_LIMIT_BYTES").ok())?
            .unwrap_or(DEFAULT_BODY_LIMIT_BYTES);

        let config = Config {
            google_client_id,
            google_client_secret,
            google_refresh_token,
            google_calendar_id,
            timezone,
            host,
            port,
            calendar_call_timeout_ms,
            body_limit_bytes,
        };

        // Fail at startup rather than on the first request
        config.tz()?;

        Ok(config)
    }

    /// Parsed time zone
    pub fn tz(&self) -> AppResult<Tz> {
        Tz::from_str(&self.timezone)
            .map_err(|_| config_error(&format!("Unknown time zone: {}", self.timezone)))
    }

    /// Timeout applied to calendar provider calls
    pub fn calendar_call_timeout(&self) -> Option<Duration> {
        self.calendar_call_timeout_ms.map(Duration::from_millis)
    }
}

fn required(var: &str) -> AppResult<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(env_error(var)),
    }
}

/// Parse an optional variable, an empty value counts as unset
fn parse_var<T: FromStr>(name: &str, raw: Option<String>) -> AppResult<Option<T>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| config_error(&format!("Invalid {} format: {}", name, value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            google_client_id: "id".to_string(),
            google_client_secret: "secret".to_string(),
            google_refresh_token: "refresh".to_string(),
            google_calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            calendar_call_timeout_ms: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<u16>("PORT", None).unwrap(), None);
        assert_eq!(parse_var::<u16>("PORT", Some("  ".to_string())).unwrap(), None);
        assert_eq!(parse_var::<u16>("PORT", Some("8080".to_string())).unwrap(), Some(8080));
        assert!(parse_var::<u16>("PORT", Some("eighty".to_string())).is_err());
        assert!(parse_var::<u16>("PORT", Some("70000".to_string())).is_err());
    }

    #[test]
    fn test_timezone() {
        let mut config = sample();
        assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Kolkata);

        config.timezone = "Mars/Olympus_Mons".to_string();
        assert!(matches!(config.tz(), Err(crate::error::Error::Config(_))));
    }

    #[test]
    fn test_calendar_call_timeout() {
        let mut config = sample();
        assert_eq!(config.calendar_call_timeout(), None);

        config.calendar_call_timeout_ms = Some(2500);
        assert_eq!(config.calendar_call_timeout(), Some(Duration::from_millis(2500)));
    }
}
