use crate::config::Config;
use crate::error::{AppResult, Error};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Google OAuth token endpoint
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Exchanges the configured refresh token for short-lived access tokens.
///
/// Tokens are not cached, every call performs a fresh exchange.
#[derive(Clone)]
pub struct TokenManager {
    client: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl TokenManager {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            refresh_token: config.google_refresh_token.clone(),
        }
    }

    /// Get an access token by refreshing
    pub async fn access_token(&self) -> AppResult<String> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(Error::Authentication(format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.ok_or_else(|| {
            Error::Authentication("Token response missing 'access_token' field".to_string())
        })?;

        debug!(expires_in = ?token.expires_in, "Refreshed Google access token");
        Ok(access_token)
    }
}
