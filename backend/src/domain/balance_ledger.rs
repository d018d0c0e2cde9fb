//! Star balance ledger.
//!
//! Reads balances (absent records read as zero) and applies privileged
//! deposits. Each deposit is one atomic increment in the store, never a
//! read-modify-write, so concurrent deposits to the same handle all land.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    BalanceQuery, BalanceRepository, BalanceRepositoryError, DepositCommand, DepositReceipt,
    DepositRequest,
};
use crate::domain::{AdminCredentials, AdminGrant, AdminSecrets, Error, Handle, STORAGE_UNAVAILABLE};

/// Balance service implementing the read and deposit driving ports.
#[derive(Clone)]
pub struct BalanceLedger<B> {
    repository: Arc<B>,
    secrets: Arc<AdminSecrets>,
}

impl<B> BalanceLedger<B> {
    /// Create a ledger over `repository` guarded by `secrets`.
    pub fn new(repository: Arc<B>, secrets: Arc<AdminSecrets>) -> Self {
        Self {
            repository,
            secrets,
        }
    }
}

impl<B> BalanceLedger<B>
where
    B: BalanceRepository,
{
    fn map_repository_error(error: BalanceRepositoryError) -> Error {
        match error {
            BalanceRepositoryError::Connection { message } => {
                error!(%message, "balance repository unavailable");
                Error::service_unavailable(STORAGE_UNAVAILABLE)
            }
            BalanceRepositoryError::Query { message } => {
                Error::internal(format!("balance repository error: {message}"))
            }
            BalanceRepositoryError::Overflow { handle } => {
                Error::invalid_request("deposit would overflow the balance")
                    .with_details(json!({ "field": "amount", "uid8": handle }))
            }
        }
    }
}

#[async_trait]
impl<B> BalanceQuery for BalanceLedger<B>
where
    B: BalanceRepository,
{
    async fn balance(&self, handle: &Handle) -> Result<i64, Error> {
        let stars = self
            .repository
            .balance(handle)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(stars.unwrap_or(0))
    }
}

#[async_trait]
impl<B> DepositCommand for BalanceLedger<B>
where
    B: BalanceRepository,
{
    fn authorize(&self, credentials: &AdminCredentials) -> Result<AdminGrant, Error> {
        self.secrets.verify(credentials)
    }

    async fn deposit(
        &self,
        _grant: &AdminGrant,
        request: DepositRequest,
    ) -> Result<DepositReceipt, Error> {
        let DepositRequest { handle, amount } = request;
        let new_balance = self
            .repository
            .increment(&handle, amount)
            .await
            .map_err(|err| {
                error!(error = %err, handle = %handle, "deposit failed");
                Self::map_repository_error(err)
            })?;

        info!(handle = %handle, added = amount.get(), new_balance, "deposit applied");
        Ok(DepositReceipt {
            handle,
            added: amount.get(),
            new_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::StarAmount;
    use crate::domain::ports::MockBalanceRepository;
    use rstest::rstest;

    fn handle() -> Handle {
        Handle::parse("00042017").expect("valid handle")
    }

    fn make_ledger(repo: MockBalanceRepository) -> BalanceLedger<MockBalanceRepository> {
        let secrets = AdminSecrets::from_plaintext(Some("token".into()), Some("pw".into()));
        BalanceLedger::new(Arc::new(repo), Arc::new(secrets))
    }

    #[tokio::test]
    async fn missing_record_reads_as_zero() {
        let mut repo = MockBalanceRepository::new();
        repo.expect_balance().times(1).return_once(|_| Ok(None));

        let stars = make_ledger(repo).balance(&handle()).await.expect("balance");
        assert_eq!(stars, 0);
    }

    #[tokio::test]
    async fn stored_balance_is_returned() {
        let mut repo = MockBalanceRepository::new();
        repo.expect_balance()
            .times(1)
            .return_once(|_| Ok(Some(5_000_000_000)));

        let stars = make_ledger(repo).balance(&handle()).await.expect("balance");
        assert_eq!(stars, 5_000_000_000);
    }

    #[tokio::test]
    async fn deposit_returns_the_store_total() {
        let mut repo = MockBalanceRepository::new();
        repo.expect_increment()
            .withf(|target, amount| target.as_str() == "00042017" && amount.get() == 25)
            .times(1)
            .return_once(|_, _| Ok(35));

        let ledger = make_ledger(repo);
        let grant = ledger
            .authorize(&AdminCredentials::new("token", "pw"))
            .expect("authorised");
        let receipt = ledger
            .deposit(
                &grant,
                DepositRequest {
                    handle: handle(),
                    amount: StarAmount::new(25).expect("positive"),
                },
            )
            .await
            .expect("deposit succeeds");
        assert_eq!(receipt.handle, handle());
        assert_eq!(receipt.added, 25);
        assert_eq!(receipt.new_balance, 35);
    }

    #[rstest]
    fn authorize_rejects_wrong_secrets() {
        let mut repo = MockBalanceRepository::new();
        repo.expect_increment().never();

        let err = make_ledger(repo)
            .authorize(&AdminCredentials::new("token", "nope"))
            .expect_err("unauthorised");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(BalanceRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(BalanceRepositoryError::query("deadlock"), ErrorCode::InternalError)]
    #[case(BalanceRepositoryError::overflow("00042017"), ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn deposit_failures_are_mapped(
        #[case] failure: BalanceRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockBalanceRepository::new();
        repo.expect_increment()
            .times(1)
            .return_once(move |_, _| Err(failure));

        let err = make_ledger(repo)
            .deposit(
                &AdminGrant::for_tests(),
                DepositRequest {
                    handle: handle(),
                    amount: StarAmount::new(1).expect("positive"),
                },
            )
            .await
            .expect_err("deposit fails");
        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn connection_failures_keep_driver_text_out_of_the_message() {
        let mut repo = MockBalanceRepository::new();
        repo.expect_balance().times(1).return_once(|_| {
            Err(BalanceRepositoryError::connection(
                "could not connect to server: host \"db.internal\" (10.0.0.5) port 5432",
            ))
        });

        let err = make_ledger(repo)
            .balance(&handle())
            .await
            .expect_err("store unreachable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(err.message(), STORAGE_UNAVAILABLE);
    }
}
