//! Handle allocation endpoint.
//!
//! ```text
//! POST /api/uid8 {"telegram_id": "123456789"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_account_id};

const ACCOUNT_FIELD: &str = "telegram_id";

/// Request payload for handle allocation.
///
/// The account id may be a digit string or a non-negative JSON integer;
/// strings are preferred because ids can exceed 53 bits.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AllocateHandleRequest {
    #[serde(default, alias = "telegramId")]
    #[schema(value_type = Option<String>, example = "123456789")]
    pub telegram_id: Option<Value>,
}

/// Response payload carrying the account's handle.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllocateHandleResponse {
    #[schema(example = "00042017")]
    pub uid8: String,
}

/// Return the account's handle, allocating one on first use.
#[utoipa::path(
    post,
    path = "/api/uid8",
    request_body = AllocateHandleRequest,
    responses(
        (status = 200, description = "Handle bound to the account", body = AllocateHandleResponse),
        (status = 400, description = "Missing or malformed account id", body = ErrorSchema),
        (status = 503, description = "Handle space exhausted or database unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["uid8"],
    operation_id = "allocateHandle"
)]
#[post("/uid8")]
pub async fn allocate_handle(
    state: web::Data<HttpState>,
    payload: web::Json<AllocateHandleRequest>,
) -> ApiResult<HttpResponse> {
    let raw = payload
        .into_inner()
        .telegram_id
        .ok_or_else(|| missing_field_error(ACCOUNT_FIELD))?;
    let account_id = parse_account_id(ACCOUNT_FIELD, &raw)?;
    let handle = state.handles.allocate(&account_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(AllocateHandleResponse {
            uid8: handle.as_str().to_owned(),
        }))
}
