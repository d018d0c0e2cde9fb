//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for development and tests
//! - **handle_generator**: random candidate handles
//! - **metrics**: Prometheus exporters (feature-gated)
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod handle_generator;
pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
