//! HTTP server configuration object.

use std::net::SocketAddr;

use users_api::inbound::http::basic_auth::BasicAuth;
use users_api::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs to build the application.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) auth: BasicAuth,
}

impl ServerConfig {
    /// Construct a server configuration.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, auth: BasicAuth) -> Self {
        Self {
            bind_addr,
            db_pool,
            auth,
        }
    }
}
