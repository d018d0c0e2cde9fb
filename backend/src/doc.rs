//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every ledger endpoint and the error envelope schema.
//! Swagger UI serves it in debug builds, and `openapi-dump` prints it for
//! external tooling.

use utoipa::OpenApi;

use crate::inbound::http::admin::{AddStarsRequest, AddStarsResponse};
use crate::inbound::http::balances::{HandleBalanceResponse, UserBalanceResponse};
use crate::inbound::http::handles::{AllocateHandleRequest, AllocateHandleResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Starledger API",
        description = "Exchange handle allocation and star balances. Deposits \
            authenticate with the `botToken` and `password` fields of the request body."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::handles::allocate_handle,
        crate::inbound::http::balances::user_balance,
        crate::inbound::http::balances::handle_balance,
        crate::inbound::http::admin::add_stars,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AllocateHandleRequest,
        AllocateHandleResponse,
        UserBalanceResponse,
        HandleBalanceResponse,
        AddStarsRequest,
        AddStarsResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "uid8", description = "Exchange handle allocation"),
        (name = "balances", description = "Star balance reads"),
        (name = "admin", description = "Privileged deposits"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    #[case("/api/uid8")]
    #[case("/api/user-balance")]
    #[case("/api/stars/by-uid8/{uid8}")]
    #[case("/api/cli/add-stars")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_every_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(ERROR_SCHEMA_NAME).expect("Error schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("code"));
                assert!(obj.properties.contains_key("message"));
            }
            _ => panic!("expected Object schema"),
        }
    }
}
