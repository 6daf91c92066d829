//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};

use crate::domain::ports::{UsersCommand, UsersQuery};
use crate::domain::{BasicCredentials, StaticCredentialVerifier, UserService};
use crate::inbound::http::basic_auth::BasicAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;
use crate::test_support::InMemoryUserRepository;

/// `Authorization` value for `username:password`.
pub const VALID_AUTHORIZATION: &str = "Basic dXNlcm5hbWU6cGFzc3dvcmQ=";

/// Basic auth accepting only `username:password`.
pub fn test_auth() -> BasicAuth {
    let verifier = StaticCredentialVerifier::new(BasicCredentials::new("username", "password"));
    BasicAuth::new(Arc::new(verifier), "users")
}

/// State backed by a fresh in-memory repository.
pub fn in_memory_state() -> HttpState {
    let service = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::default())));
    HttpState::new(service.clone(), service)
}

/// State wired to explicit query and command ports.
pub fn state_with(
    query: impl UsersQuery + 'static,
    command: impl UsersCommand + 'static,
) -> HttpState {
    HttpState::new(Arc::new(query), Arc::new(command))
}

/// App exposing the `/users` scope over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(users::scope(test_auth()))
}

/// Request builder pre-authenticated with [`VALID_AUTHORIZATION`].
pub fn authed(request: actix_test::TestRequest) -> actix_test::TestRequest {
    request.insert_header((header::AUTHORIZATION, VALID_AUTHORIZATION))
}
