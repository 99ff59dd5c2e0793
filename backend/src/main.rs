//! Asset ledger entry-point: loads settings, prepares the database and serves
//! the REST API.

mod server;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use asset_ledger::outbound::persistence::{DbPool, run_pending_migrations};
use asset_ledger::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server, health_state_for};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let pool_config = settings.pool_config().map_err(std::io::Error::other)?;

    if settings.run_migrations() {
        run_pending_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
    } else {
        info!("skipping database migrations");
    }

    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let config = ServerConfig::new(settings.bind_addr(), pool);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::make_metrics());

    let health_state = health_state_for(&config);
    let server = create_server(health_state, config)?;
    server.await
}
