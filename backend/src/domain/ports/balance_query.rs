//! Driving port for reading balances by handle.

use async_trait::async_trait;

use crate::domain::{Error, Handle};

/// Read star balances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BalanceQuery: Send + Sync {
    /// Balance of `handle`; zero when nothing was deposited.
    async fn balance(&self, handle: &Handle) -> Result<i64, Error>;
}
