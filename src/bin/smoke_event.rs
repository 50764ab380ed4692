use chrono::{Days, Utc};
use voice_scheduler::calendar::{CalendarService, EventDraft, GoogleCalendarClient};
use voice_scheduler::config::Config;
use voice_scheduler::error::{other_error, AppResult};
use voice_scheduler::normalizer::NormalizedRequest;

/// Create a real event tomorrow at 14:00 to check credentials end to end
#[tokio::main]
async fn main() -> AppResult<()> {
    println!("Testing Google Calendar event creation\n");

    if let Err(e) = run().await {
        eprintln!("ERROR: {}", e);
        eprintln!("\nPossible issues:");
        eprintln!("  1. Check your .env file has correct credentials");
        eprintln!("  2. Verify Google Calendar API is enabled");
        eprintln!("  3. Confirm refresh token is valid");
        eprintln!("  4. Make sure you added yourself as test user in OAuth consent screen");
        return Err(e);
    }

    Ok(())
}

async fn run() -> AppResult<()> {
    let config = Config::load()?;

    let tomorrow = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .ok_or_else(|| other_error("Date out of range"))?;

    let request = NormalizedRequest {
        name: "Test User".to_string(),
        date: tomorrow.format("%Y-%m-%d").to_string(),
        time: "14:00".to_string(),
        title: Some("Test Meeting from Voice Agent".to_string()),
    };

    println!("Test parameters:");
    println!("  Name: {}", request.name);
    println!("  Date: {}", request.date);
    println!("  Time: {}", request.time);
    println!("  Title: {}\n", request.title.as_deref().unwrap_or_default());

    let draft = EventDraft::from_request(&request, config.tz()?)?;
    let client = GoogleCalendarClient::new(&config)?;

    println!("Creating event...\n");
    let result = client.create_event(&draft).await?;

    println!("SUCCESS! Event created:\n");
    println!("  Event ID: {}", result.event_id);
    println!("  Event Link: {}", result.event_link.as_deref().unwrap_or("-"));
    println!("  Summary: {}", result.summary);
    println!("  Start: {}", result.start);
    println!("  End: {}\n", result.end);
    println!("Check your Google Calendar to see the event!");

    Ok(())
}
