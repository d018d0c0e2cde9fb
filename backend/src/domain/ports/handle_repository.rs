//! Driven port for account-to-handle bindings.
//!
//! The store enforces two uniqueness rules: one binding per account and one
//! account per handle. Adapters must report each violation as its own error
//! variant so the allocator can tell a handle collision (retry with a new
//! candidate) from a lost race on the account (re-read the winner).

use async_trait::async_trait;

use crate::domain::{AccountId, Handle};

use super::define_port_error;

define_port_error! {
    /// Errors raised by binding repositories.
    pub enum HandleRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "handle repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "handle repository query failed: {message}",
        /// The candidate handle is already bound to another account.
        DuplicateHandle { handle: String } => "handle {handle} is already assigned",
        /// The account already has a binding.
        DuplicateAccount { account_id: String } => "account {account_id} already has a handle",
    }
}

/// Persistence port for account-to-handle bindings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HandleRepository: Send + Sync {
    /// Fetch the handle bound to `account_id`, if any.
    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Handle>, HandleRepositoryError>;

    /// Atomically insert a new binding.
    ///
    /// Fails with [`HandleRepositoryError::DuplicateHandle`] or
    /// [`HandleRepositoryError::DuplicateAccount`] when the insert would break
    /// a uniqueness rule; nothing is written in either case.
    async fn insert(
        &self,
        account_id: &AccountId,
        handle: &Handle,
    ) -> Result<(), HandleRepositoryError>;
}
