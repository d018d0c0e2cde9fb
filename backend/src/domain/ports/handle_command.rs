//! Driving ports for exchange handles.
//!
//! Inbound adapters allocate and look up handles through these traits and
//! never touch the binding store directly.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, Handle};

/// Allocate handles for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HandleCommand: Send + Sync {
    /// Return the handle bound to `account_id`, creating one if needed.
    ///
    /// Repeated calls for the same account always return the same handle.
    async fn allocate(&self, account_id: &AccountId) -> Result<Handle, Error>;
}

/// Look up handles without allocating.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HandleQuery: Send + Sync {
    /// Return the handle bound to `account_id`, if any.
    async fn find_handle(&self, account_id: &AccountId) -> Result<Option<Handle>, Error>;
}
