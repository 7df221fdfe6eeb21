use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use matrimony_api::cli::Cli;
use matrimony_api::config;
use matrimony_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use matrimony_api::services::{OfflineProcessor, PaymentProcessor, StripeProcessor};
use matrimony_api::{app, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    let default_filter = if config.server.enable_request_logging {
        "info,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let cli = Cli::parse();
    info!("Starting Matrimony API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in {:?} mode", config.environment);
    }

    let store: Arc<dyn Store> = if cli.memory {
        warn!("Using in-process store; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database).await?;
        DatabaseManager::ensure_schema(&pool).await?;
        Arc::new(PgStore::new(pool))
    };

    let payments: Arc<dyn PaymentProcessor> = match StripeProcessor::from_config(&config.payment) {
        Ok(stripe) => Arc::new(stripe),
        Err(e) if is_production!() => return Err(e).context("Stripe is required in production"),
        Err(_) => {
            warn!("STRIPE_SECRET_KEY not set; payment intents are simulated");
            Arc::new(OfflineProcessor)
        }
    };

    let state = AppState::new(config, store, payments);

    let port = cli.port.unwrap_or(config.server.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Matrimony API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server")?;
    Ok(())
}
