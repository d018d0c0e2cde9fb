//! Driving port for privileged deposits.
//!
//! Deposits are two-step: the caller first trades its credential pair for an
//! [`AdminGrant`], then presents the grant with each deposit. Inbound
//! adapters authorise before parsing the rest of the request, so a caller
//! without valid secrets learns nothing about handle or amount validation.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{AdminCredentials, AdminGrant, Error, Handle, StarAmount};

/// Validated deposit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
    /// Handle whose balance is credited.
    pub handle: Handle,
    /// Amount added to the balance.
    pub amount: StarAmount,
}

/// Outcome of a successful deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositReceipt {
    /// Handle whose balance was credited.
    pub handle: Handle,
    /// Amount added by this deposit.
    pub added: i64,
    /// Durable balance after the deposit.
    pub new_balance: i64,
}

/// Credit star balances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepositCommand: Send + Sync {
    /// Check the presented credential pair.
    fn authorize(&self, credentials: &AdminCredentials) -> Result<AdminGrant, Error>;

    /// Atomically add the requested amount and return the new balance.
    async fn deposit(
        &self,
        grant: &AdminGrant,
        request: DepositRequest,
    ) -> Result<DepositReceipt, Error>;
}
