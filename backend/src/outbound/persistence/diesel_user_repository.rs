//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Uniqueness and concurrency are enforced by the statements themselves:
//! inserts use `ON CONFLICT DO NOTHING RETURNING` so a lost email race
//! yields no row, and updates filter on the expected version so a concurrent
//! writer leaves zero rows affected.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserDetails, UserId, Version};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } => UserPersistenceError::connection(message),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> User {
    let UserRow {
        id,
        name,
        email,
        version,
    } = row;
    User::from_stored(UserId::new(id), name, email, Version::new(version))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.value()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_user))
    }

    async fn insert(&self, details: &UserDetails) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            name: details.name().as_str(),
            email: details.email().as_str(),
            version: Version::INITIAL.value(),
        };
        let inserted = diesel::insert_into(users::table)
            .values(&new_row)
            .on_conflict_do_nothing()
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match inserted {
            Some(row) => Ok(row_to_user(row)),
            None => {
                debug!("insert skipped by email conflict");
                Err(UserPersistenceError::duplicate_email())
            }
        }
    }

    async fn update(
        &self,
        id: UserId,
        expected: Version,
        details: &UserDetails,
    ) -> Result<User, UserPersistenceError> {
        let next = expected
            .next()
            .ok_or_else(|| UserPersistenceError::query("user version overflow"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            name: details.name().as_str(),
            email: details.email().as_str(),
            version: next.value(),
        };
        let updated = diesel::update(
            users::table
                .filter(users::id.eq(id.value()))
                .filter(users::version.eq(expected.value())),
        )
        .set(&changes)
        .returning(UserRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = updated {
            return Ok(row_to_user(row));
        }

        // Zero rows: either the user vanished or its version moved on.
        let current: Option<i32> = users::table
            .filter(users::id.eq(id.value()))
            .select(users::version)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match current {
            Some(actual) => Err(UserPersistenceError::version_mismatch(
                expected.value(),
                actual,
            )),
            None => Err(UserPersistenceError::not_found(id.value())),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.filter(users::id.eq(id.value())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
