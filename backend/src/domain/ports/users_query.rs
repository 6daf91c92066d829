//! Driving port for reading users.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for fetching one user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return the matching user as a zero- or one-element list.
    ///
    /// A missing user is an empty list, not an error.
    async fn get_user(&self, id: UserId) -> Result<Vec<User>, Error>;
}
