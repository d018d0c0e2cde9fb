//! Driving port for reading a balance by external account id.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, Handle};

/// Balance view for an account that may not have a handle yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    /// Bound handle, or `None` when the account was never allocated one.
    pub handle: Option<Handle>,
    /// Current balance; zero without a handle.
    pub stars: i64,
}

/// Read balances by account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountBalanceQuery: Send + Sync {
    /// Look up (never allocate) the account's handle, then read its balance.
    async fn balance_for_account(&self, account_id: &AccountId) -> Result<AccountBalance, Error>;
}
