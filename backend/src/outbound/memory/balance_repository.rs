//! In-memory [`BalanceRepository`].

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{BalanceRepository, BalanceRepositoryError};
use crate::domain::{Handle, StarAmount};

/// Balance store backed by a single map.
#[derive(Debug, Default)]
pub struct InMemoryBalanceRepository {
    balances: Mutex<HashMap<Handle, i64>>,
}

impl InMemoryBalanceRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> BalanceRepositoryError {
        BalanceRepositoryError::query("in-memory balance store is poisoned")
    }
}

#[async_trait]
impl BalanceRepository for InMemoryBalanceRepository {
    async fn balance(&self, handle: &Handle) -> Result<Option<i64>, BalanceRepositoryError> {
        let balances = self.balances.lock().map_err(|_| Self::poisoned())?;
        Ok(balances.get(handle).copied())
    }

    async fn increment(
        &self,
        handle: &Handle,
        amount: StarAmount,
    ) -> Result<i64, BalanceRepositoryError> {
        let mut balances = self.balances.lock().map_err(|_| Self::poisoned())?;
        let current = balances.get(handle).copied().unwrap_or(0);
        let updated = current
            .checked_add(amount.get())
            .ok_or_else(|| BalanceRepositoryError::overflow(handle.as_str()))?;
        balances.insert(handle.clone(), updated);
        Ok(updated)
    }
}
