//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed vocabulary of the ledger (account ids,
//! handles, star amounts), the services enforcing allocation and deposit
//! rules, and the ports adapters implement. Nothing in here knows about HTTP
//! or SQL.
//!
//! Public surface:
//! - [`AccountId`], [`Handle`], [`StarAmount`]: validated identifiers and
//!   amounts.
//! - [`HandleAllocator`], [`BalanceLedger`], [`AccountBalanceService`]:
//!   driving-port implementations.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.

mod account_balance;
mod account_id;
mod auth;
mod balance_ledger;
pub mod error;
mod handle;
mod handle_allocator;
pub mod ports;
mod stars;
mod trace_id;

pub use self::account_balance::AccountBalanceService;
pub use self::account_id::{ACCOUNT_ID_MAX_DIGITS, AccountId, AccountIdValidationError};
pub use self::auth::{AdminCredentials, AdminGrant, AdminSecrets};
pub use self::balance_ledger::BalanceLedger;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::handle::{HANDLE_DIGITS, HANDLE_SPACE, Handle, HandleValidationError};
pub use self::handle_allocator::{DEFAULT_MAX_ATTEMPTS, HandleAllocator};
pub use self::stars::{StarAmount, StarAmountValidationError};
pub use self::trace_id::TraceId;

/// Client-facing message for errors raised when storage is unreachable.
pub const STORAGE_UNAVAILABLE: &str = "storage is temporarily unavailable";

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
