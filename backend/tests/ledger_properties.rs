//! Behavioural properties of the ledger services over the in-memory store.
//!
//! These run the real services end to end without a database: allocation
//! idempotence and uniqueness, the handle format, balance defaults,
//! concurrent deposits, rejection rules and simulated exhaustion.

use std::collections::HashSet;
use std::sync::Arc;

use rstest::{fixture, rstest};
use starledger::domain::ports::{
    AccountBalanceQuery, BalanceQuery, DepositCommand, DepositRequest, HandleCommand,
    HandleGenerator,
};
use starledger::domain::{
    AccountBalanceService, AccountId, AdminCredentials, AdminSecrets, BalanceLedger, ErrorCode,
    Handle, HandleAllocator, StarAmount,
};
use starledger::outbound::handle_generator::{SeededHandleGenerator, ThreadRngHandleGenerator};
use starledger::outbound::memory::{InMemoryBalanceRepository, InMemoryHandleRepository};

const BOT_TOKEN: &str = "bot-token";
const PASSWORD: &str = "admin-password";

type Allocator = HandleAllocator<InMemoryHandleRepository, ThreadRngHandleGenerator>;
type Ledger = BalanceLedger<InMemoryBalanceRepository>;

#[fixture]
fn allocator() -> Arc<Allocator> {
    Arc::new(HandleAllocator::new(
        Arc::new(InMemoryHandleRepository::new()),
        Arc::new(ThreadRngHandleGenerator),
    ))
}

#[fixture]
fn ledger() -> Arc<Ledger> {
    let secrets = AdminSecrets::from_plaintext(Some(BOT_TOKEN.into()), Some(PASSWORD.into()));
    Arc::new(BalanceLedger::new(
        Arc::new(InMemoryBalanceRepository::new()),
        Arc::new(secrets),
    ))
}

fn account(raw: &str) -> AccountId {
    AccountId::parse(raw).expect("valid account id")
}

fn handle(raw: &str) -> Handle {
    Handle::parse(raw).expect("valid handle")
}

fn request(target: &Handle, amount: i64) -> DepositRequest {
    DepositRequest {
        handle: target.clone(),
        amount: StarAmount::new(amount).expect("positive amount"),
    }
}

#[rstest]
#[tokio::test]
async fn allocation_is_idempotent(allocator: Arc<Allocator>) {
    let first = allocator.allocate(&account("123456")).await.expect("allocate");
    for _ in 0..5 {
        let again = allocator.allocate(&account("123456")).await.expect("allocate");
        assert_eq!(again, first);
    }
}

#[rstest]
#[tokio::test]
async fn handles_are_unique_and_well_formed(allocator: Arc<Allocator>) {
    let mut seen = HashSet::new();
    for id in 0..500_u32 {
        let handle = allocator
            .allocate(&account(&id.to_string()))
            .await
            .expect("allocate");
        assert_eq!(handle.as_str().len(), 8);
        assert!(handle.as_str().bytes().all(|b| b.is_ascii_digit()));
        assert!(seen.insert(handle), "handle issued twice");
    }
}

#[rstest]
#[tokio::test]
async fn concurrent_first_allocations_agree(allocator: Arc<Allocator>) {
    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let allocator = Arc::clone(&allocator);
            tokio::spawn(async move { allocator.allocate(&account("777")).await })
        })
        .collect();
    let mut handles = HashSet::new();
    for task in tasks {
        handles.insert(task.await.expect("task joins").expect("allocate"));
    }
    assert_eq!(handles.len(), 1, "every caller must see the same handle");
}

#[rstest]
#[tokio::test]
async fn unknown_handles_read_zero(ledger: Arc<Ledger>) {
    assert_eq!(ledger.balance(&handle("00000000")).await.expect("balance"), 0);
}

#[rstest]
#[tokio::test]
async fn sequential_deposits_accumulate(ledger: Arc<Ledger>) {
    let target = handle("00042017");
    let grant = ledger
        .authorize(&AdminCredentials::new(BOT_TOKEN, PASSWORD))
        .expect("authorised");

    let first = ledger.deposit(&grant, request(&target, 10)).await.expect("deposit");
    let second = ledger.deposit(&grant, request(&target, 25)).await.expect("deposit");
    assert_eq!(first.new_balance, 10);
    assert_eq!(second.new_balance, 35);
    assert_eq!(ledger.balance(&target).await.expect("balance"), 35);
}

#[rstest]
#[tokio::test]
async fn concurrent_deposits_are_not_lost(ledger: Arc<Ledger>) {
    let target = handle("00042017");
    let grant = ledger
        .authorize(&AdminCredentials::new(BOT_TOKEN, PASSWORD))
        .expect("authorised");

    let tasks: Vec<_> = [10, 25]
        .into_iter()
        .map(|amount| {
            let ledger = Arc::clone(&ledger);
            let deposit = request(&target, amount);
            tokio::spawn(async move { ledger.deposit(&grant, deposit).await })
        })
        .collect();
    for task in tasks {
        task.await.expect("task joins").expect("deposit");
    }
    assert_eq!(ledger.balance(&target).await.expect("balance"), 35);
}

#[rstest]
#[case(0)]
#[case(-5)]
fn non_positive_amounts_are_rejected(#[case] amount: i64) {
    assert!(StarAmount::new(amount).is_err());
}

#[rstest]
#[case("1.5")]
#[case("abc")]
#[case("")]
fn non_integer_amounts_are_rejected(#[case] raw: &str) {
    assert!(StarAmount::parse_decimal(raw).is_err());
}

#[rstest]
#[case("token", "wrong")]
#[case("wrong", PASSWORD)]
#[case("", "")]
fn mismatched_secrets_are_unauthorised(
    ledger: Arc<Ledger>,
    #[case] bot_token: &str,
    #[case] password: &str,
) {
    let err = ledger
        .authorize(&AdminCredentials::new(bot_token, password))
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "invalid credentials");
}

#[rstest]
fn unconfigured_secrets_reject_everything() {
    let ledger = BalanceLedger::new(
        Arc::new(InMemoryBalanceRepository::new()),
        Arc::new(AdminSecrets::from_plaintext(None, None)),
    );
    let err = ledger
        .authorize(&AdminCredentials::new("", ""))
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case("1234567")]
#[case("123456789")]
#[case("1234567a")]
#[case("")]
fn malformed_handles_are_rejected(#[case] raw: &str) {
    assert!(Handle::parse(raw).is_err());
}

#[rstest]
#[tokio::test]
async fn exhausted_space_fails_without_binding() {
    // Reserve everything the seeded generator will offer in its first draws.
    let probe = SeededHandleGenerator::new(9);
    let reserved: Vec<Handle> = (0..3)
        .map(|_| probe.next_candidate())
        .collect();
    let repository = Arc::new(InMemoryHandleRepository::with_reserved_handles(reserved));
    let before = repository.len();

    let allocator = HandleAllocator::new(
        Arc::clone(&repository),
        Arc::new(SeededHandleGenerator::new(9)),
    )
    .with_max_attempts(3);
    let err = allocator
        .allocate(&account("4242"))
        .await
        .expect_err("exhausted");
    assert_eq!(err.code(), ErrorCode::AllocationExhausted);
    assert_eq!(repository.len(), before, "no binding may be created");
}

#[rstest]
#[tokio::test]
async fn balance_by_account_never_allocates(allocator: Arc<Allocator>, ledger: Arc<Ledger>) {
    let view = AccountBalanceService::new(allocator.clone(), ledger.clone());

    let unknown = view
        .balance_for_account(&account("31337"))
        .await
        .expect("lookup");
    assert_eq!(unknown.handle, None);
    assert_eq!(unknown.stars, 0);

    let bound = allocator.allocate(&account("31337")).await.expect("allocate");
    let grant = ledger
        .authorize(&AdminCredentials::new(BOT_TOKEN, PASSWORD))
        .expect("authorised");
    ledger.deposit(&grant, request(&bound, 7)).await.expect("deposit");

    let known = view
        .balance_for_account(&account("31337"))
        .await
        .expect("lookup");
    assert_eq!(known.handle, Some(bound));
    assert_eq!(known.stars, 7);
}
