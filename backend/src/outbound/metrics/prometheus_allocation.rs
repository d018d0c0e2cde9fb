//! Prometheus adapter for handle allocation outcomes.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{AllocationMetrics, AllocationMetricsError};

/// Metric name exported by [`PrometheusAllocationMetrics`].
pub const ALLOCATIONS_TOTAL: &str = "starledger_handle_allocations_total";

/// Counts allocation outcomes.
///
/// - **Name**: `starledger_handle_allocations_total`
/// - **Type**: Counter
/// - **Labels**: `outcome` = `allocated`, `collision` or `exhausted`
///
/// A rising `collision` to `allocated` ratio means the handle space is
/// filling up.
pub struct PrometheusAllocationMetrics {
    allocations_total: IntCounterVec,
}

impl PrometheusAllocationMetrics {
    /// Create the counter and register it with `registry`.
    ///
    /// # Errors
    ///
    /// Fails when a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let allocations_total = IntCounterVec::new(
            Opts::new(ALLOCATIONS_TOTAL, "Handle allocation attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(allocations_total.clone()))?;
        Ok(Self { allocations_total })
    }

    fn increment(&self, outcome: &str) {
        self.allocations_total.with_label_values(&[outcome]).inc();
    }
}

#[async_trait]
impl AllocationMetrics for PrometheusAllocationMetrics {
    async fn record_allocated(&self) -> Result<(), AllocationMetricsError> {
        self.increment("allocated");
        Ok(())
    }

    async fn record_collision(&self) -> Result<(), AllocationMetricsError> {
        self.increment("collision");
        Ok(())
    }

    async fn record_exhausted(&self) -> Result<(), AllocationMetricsError> {
        self.increment("exhausted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(metrics: &PrometheusAllocationMetrics, outcome: &str) -> u64 {
        metrics.allocations_total.with_label_values(&[outcome]).get()
    }

    #[test]
    fn registers_the_counter() {
        let registry = Registry::new();
        let metrics = PrometheusAllocationMetrics::new(&registry).expect("register metric");
        metrics.increment("allocated");

        let families = registry.gather();
        assert!(families.iter().any(|family| family.name() == ALLOCATIONS_TOTAL));
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = Registry::new();
        let _first = PrometheusAllocationMetrics::new(&registry).expect("register metric");
        assert!(PrometheusAllocationMetrics::new(&registry).is_err());
    }

    #[tokio::test]
    async fn outcomes_are_counted_separately() {
        let registry = Registry::new();
        let metrics = PrometheusAllocationMetrics::new(&registry).expect("register metric");
        metrics.record_collision().await.expect("record");
        metrics.record_collision().await.expect("record");
        metrics.record_allocated().await.expect("record");
        metrics.record_exhausted().await.expect("record");

        assert_eq!(counter(&metrics, "collision"), 2);
        assert_eq!(counter(&metrics, "allocated"), 1);
        assert_eq!(counter(&metrics, "exhausted"), 1);
    }
}
