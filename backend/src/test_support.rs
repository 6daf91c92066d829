//! Test utilities for the users API.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is compiled for tests and behind the
//! `test-support` feature.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserDetails, UserId, Version};

#[derive(Debug)]
struct Store {
    next_id: i32,
    users: BTreeMap<i32, User>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            users: BTreeMap::new(),
        }
    }
}

/// In-memory [`UserRepository`] enforcing the same uniqueness and version
/// rules as the PostgreSQL adapter.
///
/// # Examples
/// ```
/// use users_api::domain::ports::UserRepository;
/// use users_api::domain::UserDetails;
/// use users_api::test_support::InMemoryUserRepository;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::default();
/// let details = UserDetails::try_from_parts(Some("Ann"), Some("ann@example.com")).unwrap();
/// let user = repo.insert(&details).await.unwrap();
/// assert_eq!(user.id().value(), 1);
/// assert!(repo.insert(&details).await.is_err());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().map(|store| store.users.len()).unwrap_or_default()
    }

    /// Whether no users are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory store poisoned"))
    }
}

fn email_taken(store: &Store, email: &EmailAddress, except: Option<i32>) -> bool {
    store
        .users
        .values()
        .any(|user| user.email() == email && Some(user.id().value()) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id.value()).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn insert(&self, details: &UserDetails) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if email_taken(&store, details.email(), None) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let user = User::new(UserId::new(id), details.clone(), Version::INITIAL);
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: UserId,
        expected: Version,
        details: &UserDetails,
    ) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        let current = store
            .users
            .get(&id.value())
            .map(User::version)
            .ok_or_else(|| UserPersistenceError::not_found(id.value()))?;
        if current != expected {
            return Err(UserPersistenceError::version_mismatch(
                expected.value(),
                current.value(),
            ));
        }
        if email_taken(&store, details.email(), Some(id.value())) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let next = current
            .next()
            .ok_or_else(|| UserPersistenceError::query("user version overflow"))?;
        let user = User::new(id, details.clone(), next);
        store.users.insert(id.value(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.remove(&id.value()).is_some())
    }
}
