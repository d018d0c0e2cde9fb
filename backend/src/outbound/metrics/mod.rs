//! Prometheus exporters for domain metrics ports.
//!
//! Only compiled with the `metrics` feature.

mod prometheus_allocation;

pub use prometheus_allocation::PrometheusAllocationMetrics;
