//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user and company endpoint, the schema wrappers
//! from [`crate::inbound::http::schemas`] and a bearer (JWT) security
//! scheme used by `GET /users/byToken`.
//!
//! Swagger UI serves the document in debug builds. `openapi-dump` exports it
//! for external tooling.

use crate::inbound::http::message::MessageResponse;
use crate::inbound::http::schemas::{
    CompanyPayloadSchema, CompanySchema, ErrorCodeSchema, ErrorSchema, LoginResponseSchema,
    UserPayloadSchema, UserSchema,
};
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /login, valid for 24 hours."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Record API",
        description = "User and company records with password login and bearer tokens."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_user_by_token,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::companies::delete_company,
    ),
    components(schemas(
        UserSchema,
        CompanySchema,
        ErrorSchema,
        ErrorCodeSchema,
        UserPayloadSchema,
        CompanyPayloadSchema,
        LoginRequest,
        LoginResponseSchema,
        MessageResponse
    )),
    tags(
        (name = "users", description = "User records and login"),
        (name = "companies", description = "Company records")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::path::Operation;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names.
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.UserView";
    const COMPANY_SCHEMA_NAME: &str = "crate.domain.CompanyView";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    fn operation(path: &str, method: &str) -> Operation {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get(path).expect("path registered").clone();
        match method {
            "get" => item.get,
            "post" => item.post,
            "put" => item.put,
            "delete" => item.delete,
            other => panic!("unexpected method {other}"),
        }
        .expect("operation registered")
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case(USER_SCHEMA_NAME, "_id")]
    #[case(USER_SCHEMA_NAME, "email")]
    #[case(COMPANY_SCHEMA_NAME, "creationDate")]
    fn registered_schemas_have_wire_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get(name).expect("schema registered"), field);
    }

    #[rstest]
    #[case("/users", "get")]
    #[case("/users", "post")]
    #[case("/login", "post")]
    #[case("/users/byToken", "get")]
    #[case("/users/{code}", "get")]
    #[case("/users/{code}", "put")]
    #[case("/users/{code}", "delete")]
    #[case("/companies", "get")]
    #[case("/companies", "post")]
    #[case("/companies/{code}", "get")]
    #[case("/companies/{code}", "put")]
    #[case("/companies/{code}", "delete")]
    fn every_endpoint_is_documented(#[case] path: &str, #[case] method: &str) {
        let op = operation(path, method);
        assert!(op.operation_id.is_some(), "{method} {path} has no operation id");
    }

    #[rstest]
    fn only_profile_requires_bearer_token() {
        let profile = operation("/users/byToken", "get");
        let security = serde_json::to_value(&profile.security).expect("serialises");
        assert!(security.to_string().contains(BEARER_SCHEME));

        let listing = serde_json::to_value(&operation("/users", "get").security)
            .expect("serialises");
        assert!(!listing.to_string().contains(BEARER_SCHEME));
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let schemes = &doc.components.as_ref().expect("components").security_schemes;
        let scheme = serde_json::to_value(schemes.get(BEARER_SCHEME).expect("scheme"))
            .expect("serialises");
        assert_eq!(scheme["scheme"], "bearer");
        assert_eq!(scheme["bearerFormat"], "JWT");
    }
}
