//! Diesel row types. Internal to the persistence adapters.

use diesel::prelude::*;

use super::schema::{account_handles, handle_balances};

/// Insert payload for a new binding. `created_at` takes the column default.
#[derive(Debug, Insertable)]
#[diesel(table_name = account_handles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NewAccountHandleRow<'a> {
    pub account_id: &'a str,
    pub handle: &'a str,
}

/// Insert payload for a first deposit; on conflict `stars` is the increment.
#[derive(Debug, Insertable)]
#[diesel(table_name = handle_balances)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NewBalanceRow<'a> {
    pub handle: &'a str,
    pub stars: i64,
}
