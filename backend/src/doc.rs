//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the users and health endpoints, the user and error
//! schemas, and the HTTP Basic security scheme guarding `/users`. The
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, User, UserDetails};
use crate::inbound::http::users::{CreateUserResponse, CreatedUser, UserPayload};

/// Name of the Basic security scheme referenced by the users endpoints.
pub const BASIC_AUTH_SCHEME: &str = "basicAuth";

/// Enrich the generated document with the Basic auth security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BASIC_AUTH_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some("Single configured username and password."))
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
        title = "Users API",
        description = "CRUD access to users behind HTTP Basic authentication, plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserDetails,
        UserPayload,
        CreatedUser,
        CreateUserResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/users")]
    #[case("/users/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn registers_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn registers_basic_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(matches!(
            components.security_schemes.get(BASIC_AUTH_SCHEME),
            Some(SecurityScheme::Http(_))
        ));
    }

    #[rstest]
    #[case("User")]
    #[case("Error")]
    #[case("UserPayload")]
    fn registers_schemas(#[case] name: &str) {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key(name), "missing schema {name}");
    }
}
