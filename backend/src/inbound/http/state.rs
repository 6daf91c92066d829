//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from the users read and write ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::domain::UserService;
    /// use users_api::inbound::http::state::HttpState;
    /// use users_api::test_support::InMemoryUserRepository;
    ///
    /// let service = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::default())));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.users_query.clone();
    /// ```
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }
}
