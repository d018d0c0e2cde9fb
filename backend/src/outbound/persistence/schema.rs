//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Account-to-handle bindings.
    account_handles (account_id) {
        /// Canonical account id digits.
        account_id -> Text,
        /// Eight-digit exchange handle, unique across accounts.
        #[max_length = 8]
        handle -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Star balances keyed by handle.
    handle_balances (handle) {
        #[max_length = 8]
        handle -> Varchar,
        /// Non-negative balance.
        stars -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(account_handles, handle_balances);
