//! Handle allocation service.
//!
//! Maps an account id to its exchange handle. The first call for an account
//! draws random candidates until the store accepts one; later calls return
//! the stored binding. Collisions on the handle are retried up to a fixed
//! bound, while a collision on the account means a concurrent request won
//! and its binding is returned instead.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AllocationMetrics, HandleCommand, HandleGenerator, HandleQuery, HandleRepository,
    HandleRepositoryError, NoOpAllocationMetrics,
};
use crate::domain::{AccountId, Error, Handle, STORAGE_UNAVAILABLE};

/// Candidates drawn before allocation gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy)]
enum AllocationOutcome {
    Allocated,
    Collision,
    Exhausted,
}

/// Allocates exchange handles against a binding repository.
#[derive(Clone)]
pub struct HandleAllocator<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    metrics: Arc<dyn AllocationMetrics>,
    max_attempts: u32,
}

impl<R, G> HandleAllocator<R, G> {
    /// Create an allocator with the default retry bound and no metrics.
    pub fn new(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            repository,
            generator,
            metrics: Arc::new(NoOpAllocationMetrics),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Replace the metrics recorder.
    pub fn with_metrics(mut self, metrics: Arc<dyn AllocationMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Override the retry bound. Zero is treated as one attempt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Retry bound in effect.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl<R, G> HandleAllocator<R, G>
where
    R: HandleRepository,
    G: HandleGenerator,
{
    fn map_repository_error(error: HandleRepositoryError) -> Error {
        match error {
            HandleRepositoryError::Connection { message } => {
                error!(%message, "handle repository unavailable");
                Error::service_unavailable(STORAGE_UNAVAILABLE)
            }
            other => Error::internal(format!("handle repository error: {other}")),
        }
    }

    async fn record(&self, outcome: AllocationOutcome) {
        let result = match outcome {
            AllocationOutcome::Allocated => self.metrics.record_allocated().await,
            AllocationOutcome::Collision => self.metrics.record_collision().await,
            AllocationOutcome::Exhausted => self.metrics.record_exhausted().await,
        };
        if let Err(err) = result {
            debug!(error = %err, ?outcome, "failed to record allocation metric");
        }
    }

    async fn lookup(&self, account_id: &AccountId) -> Result<Option<Handle>, Error> {
        self.repository
            .find_by_account(account_id)
            .await
            .map_err(Self::map_repository_error)
    }

    /// A concurrent request bound the account first; return its handle.
    async fn adopt_winner(&self, account_id: &AccountId) -> Result<Handle, Error> {
        match self.lookup(account_id).await? {
            Some(handle) => {
                info!(account_id = %account_id, handle = %handle, "adopted concurrently allocated handle");
                Ok(handle)
            }
            None => {
                error!(account_id = %account_id, "binding vanished after account conflict");
                Err(Error::internal(
                    "account binding conflict could not be resolved",
                ))
            }
        }
    }
}

#[async_trait]
impl<R, G> HandleCommand for HandleAllocator<R, G>
where
    R: HandleRepository,
    G: HandleGenerator,
{
    async fn allocate(&self, account_id: &AccountId) -> Result<Handle, Error> {
        if let Some(handle) = self.lookup(account_id).await? {
            return Ok(handle);
        }

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.next_candidate();
            match self.repository.insert(account_id, &candidate).await {
                Ok(()) => {
                    info!(account_id = %account_id, handle = %candidate, attempt, "allocated handle");
                    self.record(AllocationOutcome::Allocated).await;
                    return Ok(candidate);
                }
                Err(HandleRepositoryError::DuplicateHandle { .. }) => {
                    debug!(attempt, "candidate handle already taken");
                    self.record(AllocationOutcome::Collision).await;
                }
                Err(HandleRepositoryError::DuplicateAccount { .. }) => {
                    return self.adopt_winner(account_id).await;
                }
                Err(other) => {
                    error!(error = %other, account_id = %account_id, "handle insert failed");
                    return Err(Self::map_repository_error(other));
                }
            }
        }

        warn!(
            account_id = %account_id,
            attempts = self.max_attempts,
            "no free handle found within the retry bound"
        );
        self.record(AllocationOutcome::Exhausted).await;
        Err(
            Error::allocation_exhausted("could not find a free handle, try again later")
                .with_details(json!({ "attempts": self.max_attempts })),
        )
    }
}

#[async_trait]
impl<R, G> HandleQuery for HandleAllocator<R, G>
where
    R: HandleRepository,
    G: HandleGenerator,
{
    async fn find_handle(&self, account_id: &AccountId) -> Result<Option<Handle>, Error> {
        self.lookup(account_id).await
    }
}

#[cfg(test)]
#[path = "handle_allocator_tests.rs"]
mod tests;
