//! Cache-control policy for ledger responses.
//!
//! Balances change with every deposit and handles are per-user, so clients
//! and intermediaries must never reuse a stored response.

/// Header value forbidding any caching.
pub const NO_STORE: &str = "no-store";

/// Header tuple for `insert_header`.
pub const fn no_store_header() -> (&'static str, &'static str) {
    ("Cache-Control", NO_STORE)
}
