use std::sync::Arc;

use anyhow::Result;
use common::database::DatabaseConfig;
use mockable::{Clock, DefaultClock};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use workforce::{WorkforceService, repositories};

mod error;
mod models;
mod routes;
mod settings;
mod state;

use crate::{settings::Settings, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting punchclock API service");

    let settings = Settings::load()?;
    let hasher = settings.pin_hasher()?;

    // Storage is chosen once: PostgreSQL when DATABASE_URL is set, demo otherwise
    let database = DatabaseConfig::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = repositories::connect(
        database.as_ref(),
        &hasher,
        clock.as_ref(),
        settings.demo_latency(),
    )
    .await?;
    let service = WorkforceService::new(store, clock, hasher, settings.fallback);
    info!("Storage provider: {}", service.storage_kind());
    let app = routes::create_router(AppState { service });

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!("API service listening on {}", settings.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
