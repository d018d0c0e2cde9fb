//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`HandleGenerator`], [`AllocationMetrics`])
//! are implemented by outbound adapters. Driving ports (`*Command`,
//! `*Query`) are implemented by domain services and consumed by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_balance_query;
mod allocation_metrics;
mod balance_query;
mod balance_repository;
mod deposit_command;
mod handle_command;
mod handle_generator;
mod handle_repository;

pub use account_balance_query::{AccountBalance, AccountBalanceQuery};
#[cfg(test)]
pub use account_balance_query::MockAccountBalanceQuery;
pub use allocation_metrics::{AllocationMetrics, AllocationMetricsError, NoOpAllocationMetrics};
#[cfg(test)]
pub use allocation_metrics::MockAllocationMetrics;
pub use balance_query::BalanceQuery;
#[cfg(test)]
pub use balance_query::MockBalanceQuery;
pub use balance_repository::{BalanceRepository, BalanceRepositoryError};
#[cfg(test)]
pub use balance_repository::MockBalanceRepository;
pub use deposit_command::{DepositCommand, DepositReceipt, DepositRequest};
#[cfg(test)]
pub use deposit_command::MockDepositCommand;
pub use handle_command::{HandleCommand, HandleQuery};
#[cfg(test)]
pub use handle_command::{MockHandleCommand, MockHandleQuery};
pub use handle_generator::HandleGenerator;
#[cfg(test)]
pub use handle_generator::MockHandleGenerator;
pub use handle_repository::{HandleRepository, HandleRepositoryError};
#[cfg(test)]
pub use handle_repository::MockHandleRepository;
