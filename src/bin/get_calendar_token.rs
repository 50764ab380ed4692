use dotenvy::dotenv;
use serde_json::Value;
use std::env;
use url::Url;
use voice_scheduler::calendar::token::TOKEN_URL;
use voice_scheduler::error::{env_error, other_error, AppResult};

const REDIRECT_URI: &str = "http://localhost:8080";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenv().ok();

    // Only the client credentials are needed, the refresh token is what we are after
    let client_id = env::var("GOOGLE_CLIENT_ID").map_err(|_| env_error("GOOGLE_CLIENT_ID"))?;
    let client_secret =
        env::var("GOOGLE_CLIENT_SECRET").map_err(|_| env_error("GOOGLE_CLIENT_SECRET"))?;

    // Generate random state for security
    let state = uuid::Uuid::new_v4().to_string();

    let auth_url = Url::parse_with_params(
        "https://accounts.google.com/o/oauth2/v2/auth",
        &[
            ("client_id", client_id.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("scope", CALENDAR_SCOPE),
            ("state", state.as_str()),
        ],
    )
    .map_err(|e| other_error(&format!("Failed to build authorization URL: {}", e)))?;

    // Open browser for authorization
    println!("Opening browser for Google Calendar authorization...");
    println!("If it does not open, visit:\n{}\n", auth_url);
    webbrowser::open(auth_url.as_str())?;

    // Start local server to receive the callback
    let server = tiny_http::Server::http("0.0.0.0:8080")
        .map_err(|e| other_error(&format!("Failed to start callback server: {}", e)))?;
    println!("Waiting for authorization callback...");

    let request = server.recv()?;
    let callback = Url::parse(REDIRECT_URI)
        .and_then(|base| base.join(request.url()))
        .map_err(|e| other_error(&format!("Invalid callback URL: {}", e)))?;

    let param = |key: &str| {
        callback
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    if param("state").as_deref() != Some(state.as_str()) {
        request.respond(tiny_http::Response::from_string("State mismatch, please retry."))?;
        return Err(other_error("State mismatch in authorization callback"));
    }

    let code = param("code").ok_or_else(|| other_error("No authorization code found in callback"))?;

    // Exchange code for tokens
    let response = reqwest::Client::new()
        .post(TOKEN_URL)
        .form(&[
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("code", code.as_str()),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let error_text = response.text().await?;
        return Err(other_error(&format!("Failed to get token: {}", error_text)));
    }

    let token_data: Value = response.json().await?;
    let refresh_token = token_data
        .get("refresh_token")
        .and_then(Value::as_str)
        .ok_or_else(|| other_error("Token response has no refresh_token, revoke access and retry"))?;

    // Send success response to browser
    request.respond(tiny_http::Response::from_string(
        "Authorization successful! You can close this window.",
    ))?;

    println!("\nAdd this to your .env file:\n");
    println!("GOOGLE_REFRESH_TOKEN={}", refresh_token);

    Ok(())
}
