//! Builders wiring persistence adapters into HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use users_api::domain::UserService;
use users_api::inbound::http::state::HttpState;
use users_api::outbound::persistence::{DbPool, DieselUserRepository};

/// Build handler state backed by the Diesel user repository.
pub(crate) fn build_http_state(pool: DbPool) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(Arc::new(DieselUserRepository::new(pool))));
    web::Data::new(HttpState::new(service.clone(), service))
}
