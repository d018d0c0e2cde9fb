//! HTTP inbound adapter exposing the ledger REST endpoints.
//!
//! Handlers translate JSON and query parameters into domain types, call a
//! driving port from [`state::HttpState`], and render the result. They hold
//! no business rules.

pub mod admin;
pub mod balances;
pub mod cache_control;
pub mod error;
pub mod handles;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, ResponseError, web};

use crate::domain::Error;

pub use error::ApiResult;

/// Request bodies are tiny; reject anything larger outright.
const JSON_LIMIT_BYTES: usize = 16 * 1024;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = Error::invalid_request(format!("invalid JSON body: {err}")).error_response();
    InternalError::from_response(err, response).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = Error::invalid_request(format!("invalid query string: {err}")).error_response();
    InternalError::from_response(err, response).into()
}

/// JSON extractor settings rendering failures as the error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(json_error)
}

/// Query extractor settings rendering failures as the error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

/// Register the `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .service(handles::allocate_handle)
            .service(balances::user_balance)
            .service(balances::handle_balance)
            .service(admin::add_stars),
    );
}

/// Register the health probes. The caller provides `web::Data<HealthState>`.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(health::ready)
        .service(health::live);
}
