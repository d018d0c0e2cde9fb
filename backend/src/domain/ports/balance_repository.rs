//! Driven port for star balances.

use async_trait::async_trait;

use crate::domain::{Handle, StarAmount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by balance repositories.
    pub enum BalanceRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "balance repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "balance repository query failed: {message}",
        /// The increment would overflow the stored balance.
        Overflow { handle: String } => "balance for {handle} would overflow",
    }
}

/// Persistence port for balance records keyed by handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Current balance for `handle`, or `None` when no deposit was ever made.
    async fn balance(&self, handle: &Handle) -> Result<Option<i64>, BalanceRepositoryError>;

    /// Add `amount` to the balance of `handle` and return the new total.
    ///
    /// Implementations must apply the change as one atomic step, creating the
    /// record when it is missing, so concurrent increments are never lost.
    async fn increment(
        &self,
        handle: &Handle,
        amount: StarAmount,
    ) -> Result<i64, BalanceRepositoryError>;
}
