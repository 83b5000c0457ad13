use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tripcast::config::LoggingConfig;
use tripcast::{AppState, TripcastConfig, web};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = TripcastConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!("Tripcast v{} starting...", tripcast::VERSION);

    let state = AppState::from_config(config).context("Failed to initialize providers")?;
    web::run(state).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
