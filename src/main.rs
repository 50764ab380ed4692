use tracing::info;
use voice_scheduler::startup;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting voice scheduling backend");

    // Load configuration
    let config = startup::load_config()?;

    // Start the server
    startup::start_server(config).await
}
