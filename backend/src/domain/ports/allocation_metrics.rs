//! Domain port for recording handle allocation outcomes.
//!
//! Lets operators watch the collision rate as the handle space fills up
//! without tying the allocator to a metrics backend.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording allocation metrics.
    pub enum AllocationMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "allocation metrics exporter failed: {message}",
    }
}

/// Metrics recording port for the handle allocator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllocationMetrics: Send + Sync {
    /// A new binding was created.
    async fn record_allocated(&self) -> Result<(), AllocationMetricsError>;

    /// A candidate handle was already taken.
    async fn record_collision(&self) -> Result<(), AllocationMetricsError>;

    /// The retry bound was exhausted.
    async fn record_exhausted(&self) -> Result<(), AllocationMetricsError>;
}

/// Recorder used when metrics are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpAllocationMetrics;

#[async_trait]
impl AllocationMetrics for NoOpAllocationMetrics {
    async fn record_allocated(&self) -> Result<(), AllocationMetricsError> {
        Ok(())
    }

    async fn record_collision(&self) -> Result<(), AllocationMetricsError> {
        Ok(())
    }

    async fn record_exhausted(&self) -> Result<(), AllocationMetricsError> {
        Ok(())
    }
}
