//! Privileged deposit endpoint used by the `add-stars` command.
//!
//! ```text
//! POST /api/cli/add-stars {"botToken", "password", "uid8", "amount"}
//! ```
//!
//! Credentials are checked before anything else in the body is looked at,
//! so an unauthorised caller always gets the same 401 whatever the handle
//! or amount.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::DepositRequest;
use crate::domain::{AdminCredentials, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_amount, parse_handle};

const HANDLE_FIELD: &str = "uid8";
const AMOUNT_FIELD: &str = "amount";

/// Request payload for a deposit.
///
/// Fields are loosely typed so that a malformed body still reaches the
/// credential check instead of failing JSON extraction.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStarsRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub bot_token: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub password: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "00042017")]
    pub uid8: Option<Value>,
    #[serde(default)]
    #[schema(value_type = i64, example = 25)]
    pub amount: Option<Value>,
}

/// Response payload for a successful deposit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddStarsResponse {
    pub ok: bool,
    #[schema(example = "00042017")]
    pub uid8: String,
    #[schema(example = 25)]
    pub added: i64,
    #[schema(example = 35)]
    pub new_balance: i64,
}

fn secret_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

fn handle_text(value: Option<Value>) -> Result<String, Error> {
    match value {
        None | Some(Value::Null) => Err(missing_field_error(HANDLE_FIELD)),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Ok(other.to_string()),
    }
}

/// Add stars to a handle's balance.
#[utoipa::path(
    post,
    path = "/api/cli/add-stars",
    request_body = AddStarsRequest,
    responses(
        (status = 200, description = "Deposit applied", body = AddStarsResponse),
        (status = 400, description = "Malformed handle or amount", body = ErrorSchema),
        (status = 401, description = "Credential pair rejected", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "addStars"
)]
#[post("/cli/add-stars")]
pub async fn add_stars(
    state: web::Data<HttpState>,
    payload: web::Json<AddStarsRequest>,
) -> ApiResult<HttpResponse> {
    let AddStarsRequest {
        bot_token,
        password,
        uid8,
        amount,
    } = payload.into_inner();

    let credentials = AdminCredentials::new(secret_text(bot_token), secret_text(password));
    let grant = state.deposits.authorize(&credentials)?;
    drop(credentials);

    let handle = parse_handle(HANDLE_FIELD, &handle_text(uid8)?)?;
    let amount = amount
        .filter(|value| !value.is_null())
        .ok_or_else(|| missing_field_error(AMOUNT_FIELD))?;
    let amount = parse_amount(AMOUNT_FIELD, &amount)?;

    let receipt = state
        .deposits
        .deposit(&grant, DepositRequest { handle, amount })
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(AddStarsResponse {
            ok: true,
            uid8: receipt.handle.as_str().to_owned(),
            added: receipt.added,
            new_balance: receipt.new_balance,
        }))
}
