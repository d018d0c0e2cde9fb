//! Balance read endpoints.
//!
//! ```text
//! GET /api/user-balance?user_id=123
//! GET /api/stars/by-uid8/{uid8}
//! ```
//!
//! Neither endpoint allocates: an account without a handle reads as
//! `{"ok": true, "uid8": null, "stars": 0}`.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_account_id_text, parse_handle};

const USER_FIELD: &str = "user_id";
const HANDLE_FIELD: &str = "uid8";

/// Query parameters for the account balance lookup.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserBalanceParams {
    /// External account id as a digit string.
    #[param(example = "123456789")]
    pub user_id: Option<String>,
}

/// Balance of an account, with its handle when one was allocated.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserBalanceResponse {
    pub ok: bool,
    #[schema(example = "00042017")]
    pub uid8: Option<String>,
    #[schema(example = 35)]
    pub stars: i64,
}

/// Balance of a handle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HandleBalanceResponse {
    pub ok: bool,
    #[schema(example = "00042017")]
    pub uid8: String,
    #[schema(example = 35)]
    pub stars: i64,
}

/// Read the balance of an external account.
#[utoipa::path(
    get,
    path = "/api/user-balance",
    params(UserBalanceParams),
    responses(
        (
            status = 200,
            description = "Account balance",
            headers(("Cache-Control" = String, description = "Always no-store")),
            body = UserBalanceResponse
        ),
        (status = 400, description = "Missing or malformed account id", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["balances"],
    operation_id = "getUserBalance"
)]
#[get("/user-balance")]
pub async fn user_balance(
    state: web::Data<HttpState>,
    query: web::Query<UserBalanceParams>,
) -> ApiResult<HttpResponse> {
    let raw = query
        .into_inner()
        .user_id
        .ok_or_else(|| missing_field_error(USER_FIELD))?;
    let account_id = parse_account_id_text(USER_FIELD, &raw)?;
    let view = state.account_balances.balance_for_account(&account_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(UserBalanceResponse {
            ok: true,
            uid8: view.handle.map(|handle| handle.as_str().to_owned()),
            stars: view.stars,
        }))
}

/// Read the balance of a handle.
#[utoipa::path(
    get,
    path = "/api/stars/by-uid8/{uid8}",
    params(("uid8" = String, Path, description = "Eight-digit exchange handle", example = "00042017")),
    responses(
        (
            status = 200,
            description = "Handle balance; zero when nothing was deposited",
            headers(("Cache-Control" = String, description = "Always no-store")),
            body = HandleBalanceResponse
        ),
        (status = 400, description = "Malformed handle", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["balances"],
    operation_id = "getHandleBalance"
)]
#[get("/stars/by-uid8/{uid8}")]
pub async fn handle_balance(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let handle = parse_handle(HANDLE_FIELD, &path.into_inner())?;
    let stars = state.balances.balance(&handle).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(HandleBalanceResponse {
            ok: true,
            uid8: handle.as_str().to_owned(),
            stars,
        }))
}
