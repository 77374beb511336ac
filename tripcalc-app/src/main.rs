//! # Trip Calculator Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the caching rate provider and the history store
//! - Create the calculator service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripcalc_hex::{CalculatorService, inbound::HttpServer};
use tripcalc_repo::{build_history, build_rate_provider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,tripcalc_app=debug,tripcalc_hex=debug,tripcalc_repo=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting trip calculator on port {}", config.port);
    tracing::info!(
        "Using rate API {} (cache ttl {}s)",
        config.rates_api_url,
        config.rate_cache_ttl.num_seconds()
    );
    match &config.history_database_url {
        Some(url) => tracing::info!("Persisting history in {}", url),
        None => tracing::info!("Keeping history in memory"),
    }

    // One provider for the process lifetime: it owns the rate cache
    let rates = build_rate_provider(&config.rates_api_url, config.rate_cache_ttl);
    let history = build_history(config.history_database_url.as_deref()).await?;

    // Create the calculator service
    let service = CalculatorService::new(rates, history);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
