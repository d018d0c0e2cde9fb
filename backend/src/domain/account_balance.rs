//! Balance lookup by external account id.
//!
//! Composes the handle lookup and the balance read. The lookup never
//! allocates, so asking for the balance of an unknown account leaves no
//! trace in the store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{AccountBalance, AccountBalanceQuery, BalanceQuery, HandleQuery};
use crate::domain::{AccountId, Error};

/// Service implementing [`AccountBalanceQuery`].
#[derive(Clone)]
pub struct AccountBalanceService {
    handles: Arc<dyn HandleQuery>,
    balances: Arc<dyn BalanceQuery>,
}

impl AccountBalanceService {
    /// Compose a handle lookup with a balance reader.
    pub fn new(handles: Arc<dyn HandleQuery>, balances: Arc<dyn BalanceQuery>) -> Self {
        Self { handles, balances }
    }
}

#[async_trait]
impl AccountBalanceQuery for AccountBalanceService {
    async fn balance_for_account(&self, account_id: &AccountId) -> Result<AccountBalance, Error> {
        let Some(handle) = self.handles.find_handle(account_id).await? else {
            return Ok(AccountBalance {
                handle: None,
                stars: 0,
            });
        };
        let stars = self.balances.balance(&handle).await?;
        Ok(AccountBalance {
            handle: Some(handle),
            stars,
        })
    }
}
