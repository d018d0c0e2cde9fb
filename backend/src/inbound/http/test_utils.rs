//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::test;

use crate::domain::ports::{AccountBalanceQuery, BalanceQuery, DepositCommand, HandleCommand};
use crate::domain::{
    AccountBalanceService, AdminSecrets, BalanceLedger, Error, HandleAllocator,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::handle_generator::SeededHandleGenerator;
use crate::outbound::memory::{InMemoryBalanceRepository, InMemoryHandleRepository};

/// Bot token accepted by [`in_memory_state`].
pub const TEST_BOT_TOKEN: &str = "test-bot-token";
/// Admin password accepted by [`in_memory_state`].
pub const TEST_PASSWORD: &str = "test-admin-password";

/// Handler state backed by fresh in-memory stores and a seeded generator.
pub fn in_memory_state() -> HttpState {
    let allocator = Arc::new(HandleAllocator::new(
        Arc::new(InMemoryHandleRepository::new()),
        Arc::new(SeededHandleGenerator::new(7)),
    ));
    let secrets = AdminSecrets::from_plaintext(
        Some(TEST_BOT_TOKEN.to_owned()),
        Some(TEST_PASSWORD.to_owned()),
    );
    let ledger = Arc::new(BalanceLedger::new(
        Arc::new(InMemoryBalanceRepository::new()),
        Arc::new(secrets),
    ));
    let account_balances = Arc::new(AccountBalanceService::new(
        allocator.clone(),
        ledger.clone(),
    ));
    HttpState::new(allocator, ledger.clone(), account_balances, ledger)
}

/// In-memory state with the handle port replaced.
pub fn state_with_handles(handles: Arc<dyn HandleCommand>) -> HttpState {
    HttpState {
        handles,
        ..in_memory_state()
    }
}

/// In-memory state with both balance read ports replaced.
pub fn state_with_balances(
    balances: Arc<dyn BalanceQuery>,
    account_balances: Arc<dyn AccountBalanceQuery>,
) -> HttpState {
    HttpState {
        balances,
        account_balances,
        ..in_memory_state()
    }
}

/// In-memory state with the deposit port replaced.
pub fn state_with_deposits(deposits: Arc<dyn DepositCommand>) -> HttpState {
    HttpState {
        deposits,
        ..in_memory_state()
    }
}

/// Decode the error envelope of a failed response.
pub async fn error_body(res: ServiceResponse) -> Error {
    test::read_body_json(res).await
}
