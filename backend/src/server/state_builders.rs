//! Builders composing domain services over the configured repositories.

use std::sync::Arc;

use starledger::domain::ports::{AllocationMetrics, BalanceRepository, HandleRepository};
#[cfg(not(feature = "metrics"))]
use starledger::domain::ports::NoOpAllocationMetrics;
use starledger::domain::{AccountBalanceService, AdminSecrets, BalanceLedger, HandleAllocator};
use starledger::inbound::http::state::HttpState;
use starledger::outbound::handle_generator::ThreadRngHandleGenerator;
use starledger::outbound::memory::{InMemoryBalanceRepository, InMemoryHandleRepository};
use starledger::outbound::persistence::{DieselBalanceRepository, DieselHandleRepository};
#[cfg(feature = "metrics")]
use starledger::{
    domain::ports::NoOpAllocationMetrics, outbound::metrics::PrometheusAllocationMetrics,
};
use tracing::warn;

use super::ServerConfig;

/// Wire allocator, ledger and account view over one pair of repositories.
fn compose_state<R, B>(
    handle_repository: Arc<R>,
    balance_repository: Arc<B>,
    secrets: Arc<AdminSecrets>,
    metrics: Arc<dyn AllocationMetrics>,
    max_attempts: u32,
) -> HttpState
where
    R: HandleRepository + 'static,
    B: BalanceRepository + 'static,
{
    let allocator = Arc::new(
        HandleAllocator::new(handle_repository, Arc::new(ThreadRngHandleGenerator))
            .with_metrics(metrics)
            .with_max_attempts(max_attempts),
    );
    let ledger = Arc::new(BalanceLedger::new(balance_repository, secrets));
    let account_balances = Arc::new(AccountBalanceService::new(
        allocator.clone(),
        ledger.clone(),
    ));
    HttpState::new(allocator, ledger.clone(), account_balances, ledger)
}

/// Allocation counters registered on the Prometheus registry when present.
///
/// # Errors
/// Returns [`std::io::Error`] if metric registration fails.
#[cfg(feature = "metrics")]
fn build_allocation_metrics(config: &ServerConfig) -> std::io::Result<Arc<dyn AllocationMetrics>> {
    match &config.prometheus {
        Some(prom) => {
            let metrics = PrometheusAllocationMetrics::new(&prom.registry).map_err(|e| {
                std::io::Error::other(format!("allocation metrics registration failed: {e}"))
            })?;
            Ok(Arc::new(metrics))
        }
        None => Ok(Arc::new(NoOpAllocationMetrics)),
    }
}

#[cfg(not(feature = "metrics"))]
fn build_allocation_metrics(_config: &ServerConfig) -> std::io::Result<Arc<dyn AllocationMetrics>> {
    Ok(Arc::new(NoOpAllocationMetrics))
}

/// Build handler state, Diesel-backed when a pool is configured and
/// in-memory otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] if metric registration fails.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let metrics = build_allocation_metrics(config)?;
    let secrets = config.secrets.clone();
    if !secrets.is_configured() {
        warn!("deposit secrets are not configured; every deposit will be rejected");
    }

    let state = match &config.db_pool {
        Some(pool) => compose_state(
            Arc::new(DieselHandleRepository::new(pool.clone())),
            Arc::new(DieselBalanceRepository::new(pool.clone())),
            secrets,
            metrics,
            config.max_attempts,
        ),
        None => {
            warn!("no database configured; balances live in memory and are lost on restart");
            compose_state(
                Arc::new(InMemoryHandleRepository::new()),
                Arc::new(InMemoryBalanceRepository::new()),
                secrets,
                metrics,
                config.max_attempts,
            )
        }
    };
    Ok(state)
}
