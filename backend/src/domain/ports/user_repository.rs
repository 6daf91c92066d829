//! Port abstraction for user persistence adapters and their errors.
//!
//! Adapters own uniqueness and version checks at the storage level: `insert`
//! must report a lost email race as [`UserPersistenceError::DuplicateEmail`]
//! and `update` must only write when the stored version equals the expected
//! one.

use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserDetails, UserId, Version};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail => "user email already exists",
        /// The stored version differs from the one the caller expected.
        VersionMismatch { expected: i32, actual: i32 } =>
            "user version mismatch: expected {expected}, found {actual}",
        /// The user to update does not exist.
        NotFound { id: i32 } => "user {id} not found",
    }
}

/// Driven port for `users` table access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the user holding `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user at [`Version::INITIAL`] and return the stored row.
    async fn insert(&self, details: &UserDetails) -> Result<User, UserPersistenceError>;

    /// Overwrite name and email when the stored version equals `expected`,
    /// bumping the version by one.
    async fn update(
        &self,
        id: UserId,
        expected: Version,
        details: &UserDetails,
    ) -> Result<User, UserPersistenceError>;

    /// Delete a user, returning whether a row was removed.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
