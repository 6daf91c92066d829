//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`UsersQuery`], [`UsersCommand`]) are consumed by the HTTP
//! adapter. Driven ports ([`UserRepository`], [`CredentialVerifier`]) are
//! implemented by outbound adapters and test doubles.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_verifier;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{AllowAllCredentials, CredentialVerifier, RejectAllCredentials};
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use users_command::MockUsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::{UpdateUserRequest, UsersCommand};
pub use users_query::UsersQuery;
