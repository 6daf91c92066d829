//! Users API library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the user model,
//! error taxonomy and use-case service; [`inbound::http`] adapts it to
//! actix-web; [`outbound::persistence`] implements storage with Diesel.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
