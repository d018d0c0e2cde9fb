//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `STARLEDGER_*` environment variables and an
//! optional configuration file, in that order of precedence. Nothing is
//! required: numeric tunables carry defaults and the rest are optional, so an
//! unconfigured server starts on the in-memory store.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::AdminSecrets;
use crate::outbound::persistence::PoolConfig;

/// Port the original service listened on.
const DEFAULT_PORT: u16 = 3000;

/// Server configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STARLEDGER")]
pub struct AppSettings {
    /// PostgreSQL connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Shared bot token required for deposits.
    pub bot_token: Option<String>,
    /// Shared admin password required for deposits.
    pub admin_password: Option<String>,
    /// Candidates drawn per allocation before giving up.
    #[ortho_config(default = 10)]
    pub handle_max_attempts: u32,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Seconds to wait for a pooled connection before failing the request.
    #[ortho_config(default = 5)]
    pub db_checkout_timeout_secs: u64,
}

impl AppSettings {
    /// Configured database URL, if any.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Listen address, defaulting to `0.0.0.0:3000`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)))
    }

    /// Allocation retry bound.
    pub fn handle_max_attempts(&self) -> u32 {
        self.handle_max_attempts
    }

    /// Pool settings for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections)
                .with_connection_timeout(Duration::from_secs(self.db_checkout_timeout_secs))
        })
    }

    /// Move the deposit secrets out of the settings and digest them.
    ///
    /// The plaintext does not outlive this call.
    pub fn take_admin_secrets(&mut self) -> AdminSecrets {
        AdminSecrets::from_plaintext(self.bot_token.take(), self.admin_password.take())
    }
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("database_url", &self.database_url().map(|_| "<set>"))
            .field("bind_addr", &self.bind_addr)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("handle_max_attempts", &self.handle_max_attempts)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_checkout_timeout_secs", &self.db_checkout_timeout_secs)
            .finish()
    }
}
