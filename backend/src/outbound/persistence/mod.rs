//! PostgreSQL persistence adapters using Diesel.
//!
//! Row types and table definitions stay private to this module; the
//! repositories translate them into domain types. Connections come from a
//! `bb8` pool driven by `diesel-async`.
//!
//! ```ignore
//! use starledger::outbound::persistence::{DbPool, DieselHandleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/starledger")).await?;
//! let handles = DieselHandleRepository::new(pool);
//! ```

mod diesel_balance_repository;
mod diesel_error_mapping;
mod diesel_handle_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_balance_repository::DieselBalanceRepository;
pub use diesel_handle_repository::DieselHandleRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
