//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDetails, UserId, VersionPrecondition};

/// Request to overwrite a user's name and email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// User to update.
    pub id: UserId,
    /// Version tokens the caller expects, taken from `If-Match`.
    pub precondition: VersionPrecondition,
    /// Replacement name and email.
    pub details: UserDetails,
}

/// Domain use-case port for creating, updating and deleting users.
///
/// # Errors
///
/// - `create_user`: [`crate::domain::ErrorCode::Conflict`] when the email is
///   taken.
/// - `update_user`: `NotFound` for an unknown id, `PreconditionFailed` when the
///   version token does not match, `Conflict` on an email collision.
/// - All operations: `InternalError` when storage fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user and return the stored record.
    async fn create_user(&self, details: UserDetails) -> Result<User, Error>;

    /// Apply an update guarded by the caller's version token.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error>;

    /// Delete a user. Succeeds whether or not the user existed.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
