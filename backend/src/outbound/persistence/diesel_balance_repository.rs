//! PostgreSQL-backed [`BalanceRepository`].
//!
//! Deposits are a single upsert that adds to the existing row or creates it,
//! returning the resulting total, so concurrent deposits are serialised by
//! the row lock and never lost. The update only fires while the sum still
//! fits in `BIGINT`; when it does not, no row comes back and the deposit is
//! reported as an overflow.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::query_dsl::methods::FilterDsl;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BalanceRepository, BalanceRepositoryError};
use crate::domain::{Handle, StarAmount};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::NewBalanceRow;
use super::pool::{DbPool, PoolError};
use super::schema::handle_balances;

/// Diesel implementation of the balance repository.
#[derive(Clone)]
pub struct DieselBalanceRepository {
    pool: DbPool,
}

impl DieselBalanceRepository {
    /// Repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BalanceRepositoryError {
    BalanceRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> BalanceRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => BalanceRepositoryError::connection(message),
        DieselFailure::UniqueViolation(_) => {
            BalanceRepositoryError::query("unexpected unique violation on balances")
        }
        DieselFailure::Query(message) => BalanceRepositoryError::query(message),
    }
}

#[async_trait]
impl BalanceRepository for DieselBalanceRepository {
    async fn balance(&self, handle: &Handle) -> Result<Option<i64>, BalanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        handle_balances::table
            .find(handle.as_str())
            .select(handle_balances::stars)
            .first::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn increment(
        &self,
        handle: &Handle,
        amount: StarAmount,
    ) -> Result<i64, BalanceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewBalanceRow {
            handle: handle.as_str(),
            stars: amount.get(),
        };
        // `amount` is positive, so the headroom cannot underflow.
        let headroom = i64::MAX - amount.get();
        let total = diesel::insert_into(handle_balances::table)
            .values(&row)
            .on_conflict(handle_balances::handle)
            .do_update()
            .set(handle_balances::stars.eq(handle_balances::stars + excluded(handle_balances::stars)))
            .filter(handle_balances::stars.le(headroom))
            .returning(handle_balances::stars)
            .get_result::<i64>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        total.ok_or_else(|| BalanceRepositoryError::overflow(handle.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("terminating connection".to_string()),
        ));
        assert!(matches!(err, BalanceRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn other_database_errors_map_to_query_errors() {
        let err = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::CheckViolation,
            Box::new("violates check constraint".to_string()),
        ));
        assert!(matches!(err, BalanceRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("refused"));
        assert_eq!(err, BalanceRepositoryError::connection("refused"));
    }
}
