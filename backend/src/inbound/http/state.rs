//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on driving
//! ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountBalanceQuery, BalanceQuery, DepositCommand, HandleCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub handles: Arc<dyn HandleCommand>,
    pub balances: Arc<dyn BalanceQuery>,
    pub account_balances: Arc<dyn AccountBalanceQuery>,
    pub deposits: Arc<dyn DepositCommand>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        handles: Arc<dyn HandleCommand>,
        balances: Arc<dyn BalanceQuery>,
        account_balances: Arc<dyn AccountBalanceQuery>,
        deposits: Arc<dyn DepositCommand>,
    ) -> Self {
        Self {
            handles,
            balances,
            account_balances,
            deposits,
        }
    }
}
