//! PostgreSQL-backed [`HandleRepository`].
//!
//! Uniqueness is left entirely to the table constraints. A rejected insert
//! is classified by the name of the violated constraint so the allocator can
//! tell a taken handle from an account that was bound concurrently.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{HandleRepository, HandleRepositoryError};
use crate::domain::{AccountId, Handle};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::NewAccountHandleRow;
use super::pool::{DbPool, PoolError};
use super::schema::account_handles;

/// Primary key on `account_handles.account_id`.
const ACCOUNT_CONSTRAINT: &str = "account_handles_pkey";
/// Unique constraint on `account_handles.handle`.
const HANDLE_CONSTRAINT: &str = "account_handles_handle_key";

/// Diesel implementation of the binding repository.
#[derive(Clone)]
pub struct DieselHandleRepository {
    pool: DbPool,
}

impl DieselHandleRepository {
    /// Repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HandleRepositoryError {
    HandleRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    account_id: &AccountId,
    handle: Option<&Handle>,
) -> HandleRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation(constraint) => match (constraint.as_deref(), handle) {
            (Some(HANDLE_CONSTRAINT), Some(handle)) => {
                HandleRepositoryError::duplicate_handle(handle.as_str())
            }
            (Some(ACCOUNT_CONSTRAINT), _) => {
                HandleRepositoryError::duplicate_account(account_id.as_str())
            }
            (other, _) => HandleRepositoryError::query(format!(
                "unexpected unique violation on {}",
                other.unwrap_or("unknown constraint")
            )),
        },
        DieselFailure::Connection(message) => HandleRepositoryError::connection(message),
        DieselFailure::Query(message) => HandleRepositoryError::query(message),
    }
}

fn parse_stored_handle(raw: String) -> Result<Handle, HandleRepositoryError> {
    Handle::parse(&raw)
        .map_err(|err| HandleRepositoryError::query(format!("corrupt handle in database: {err}")))
}

#[async_trait]
impl HandleRepository for DieselHandleRepository {
    async fn find_by_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<Handle>, HandleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored: Option<String> = account_handles::table
            .find(account_id.as_str())
            .select(account_handles::handle)
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, account_id, None))?;

        stored.map(parse_stored_handle).transpose()
    }

    async fn insert(
        &self,
        account_id: &AccountId,
        handle: &Handle,
    ) -> Result<(), HandleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewAccountHandleRow {
            account_id: account_id.as_str(),
            handle: handle.as_str(),
        };
        diesel::insert_into(account_handles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, account_id, Some(handle)))?;
        Ok(())
    }
}
