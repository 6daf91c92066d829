//! User use-case service.
//!
//! Implements the driving ports on top of a [`UserRepository`]. Uniqueness
//! and version checks run here first and are repeated by the repository's
//! conditional writes, so a concurrent writer surfaces as the same
//! conflict or precondition failure.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    UpdateUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User, UserDetails, UserId};

/// Message returned when the email is already held by another user.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";
/// Message returned when the user to update does not exist.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";
/// Message returned when `If-Match` does not match the stored version.
pub const VERSION_MISMATCH_MESSAGE: &str = "Precondition Failed - Resource version mismatch";

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
#[derive(Clone)]
pub struct UserService<R> {
    repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service backed by `repo`.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(operation: &'static str, err: UserPersistenceError) -> Error {
        match err {
            UserPersistenceError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
            UserPersistenceError::VersionMismatch { .. } => {
                Error::precondition_failed(VERSION_MISMATCH_MESSAGE)
            }
            UserPersistenceError::NotFound { .. } => Error::not_found(USER_NOT_FOUND_MESSAGE),
            UserPersistenceError::Connection { .. } | UserPersistenceError::Query { .. } => {
                error!(operation, error = %err, "user repository failure");
                Error::internal(format!("{operation} failed: {err}"))
            }
        }
    }

    async fn ensure_email_available(
        &self,
        details: &UserDetails,
        owner: Option<UserId>,
    ) -> Result<(), Error> {
        let existing = self
            .repo
            .find_by_email(details.email())
            .await
            .map_err(|err| Self::map_persistence_error("email lookup", err))?;
        match existing {
            Some(user) if Some(user.id()) != owner => {
                debug!(existing_id = %user.id(), "email already taken");
                Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get_user(&self, id: UserId) -> Result<Vec<User>, Error> {
        let found = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_persistence_error("get user", err))?;
        Ok(found.into_iter().collect())
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, details: UserDetails) -> Result<User, Error> {
        self.ensure_email_available(&details, None).await?;
        let user = self
            .repo
            .insert(&details)
            .await
            .map_err(|err| Self::map_persistence_error("create user", err))?;
        debug!(id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<User, Error> {
        let UpdateUserRequest {
            id,
            precondition,
            details,
        } = request;

        let current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_persistence_error("update user", err))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))?;

        if !precondition.is_satisfied_by(current.version()) {
            debug!(%id, stored = %current.version(), "version precondition failed");
            return Err(Error::precondition_failed(VERSION_MISMATCH_MESSAGE));
        }

        if current.email() != details.email() {
            self.ensure_email_available(&details, Some(id)).await?;
        }

        let updated = self
            .repo
            .update(id, current.version(), &details)
            .await
            .map_err(|err| Self::map_persistence_error("update user", err))?;
        debug!(%id, version = %updated.version(), "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(|err| Self::map_persistence_error("delete user", err))?;
        debug!(%id, removed, "user delete processed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
