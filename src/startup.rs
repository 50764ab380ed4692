use crate::calendar::{CalendarService, GoogleCalendarClient};
use crate::config::Config;
use crate::error::{config_error, Error};
use crate::server::{router, AppState};
use crate::shutdown;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Build the calendar client and serve HTTP until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    let time_zone = config.tz()?;
    let calendar: Arc<dyn CalendarService> = Arc::new(GoogleCalendarClient::new(&config)?);
    let state = AppState::new(calendar, time_zone);

    let app = router(state, config.body_limit_bytes);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| config_error(&format!("Invalid listen address {}:{}", config.host, config.port)))?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(Error::from)?;

    info!("Server running on port {}", config.port);
    info!("Health check: http://localhost:{}/health", config.port);
    info!("Webhook endpoint: http://localhost:{}/webhook/create-event", config.port);
    info!(
        calendar_id = %config.google_calendar_id,
        time_zone = %time_zone,
        "Ready to receive requests"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await
        .map_err(Error::from)?;

    info!("Server shut down");
    Ok(())
}
