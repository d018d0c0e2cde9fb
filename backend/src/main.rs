//! Server entry point: loads settings, prepares the store and serves the API.

mod server;

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use starledger::inbound::http::health::HealthState;
use starledger::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use starledger::settings::AppSettings;

/// Build Prometheus middleware, logging and discarding failures.
#[cfg(feature = "metrics")]
fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without them");
            None
        }
    }
}

/// Apply migrations and open the pool described by `config`.
async fn connect_database(config: PoolConfig) -> std::io::Result<DbPool> {
    run_pending_migrations(config.database_url())
        .await
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;
    let max_connections = config.max_size();
    let checkout_timeout_ms = config.connection_timeout().as_millis();
    let pool = DbPool::new(config)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
    info!(max_connections, checkout_timeout_ms, "database ready");
    Ok(pool)
}

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

    let mut settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let secrets = settings.take_admin_secrets();

    let mut config = ServerConfig::new(settings.bind_addr())
        .with_admin_secrets(secrets)
        .with_max_attempts(settings.handle_max_attempts());
    if let Some(pool_config) = settings.pool_config() {
        let pool = connect_database(pool_config).await?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(initialize_metrics(|| {
        PrometheusMetricsBuilder::new("starledger")
            .endpoint("/metrics")
            .build()
    }));

    info!(bind_addr = %settings.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
