//! In-process adapters for the ledger repositories.
//!
//! Used when no database is configured and by tests that exercise the
//! services end to end. State lives for the lifetime of the process. Each
//! table is guarded by a `std::sync::Mutex` held only for the duration of a
//! single map operation, never across an `.await`, which gives the same
//! atomicity the PostgreSQL constraints provide.

mod balance_repository;
mod handle_repository;

pub use balance_repository::InMemoryBalanceRepository;
pub use handle_repository::InMemoryHandleRepository;
