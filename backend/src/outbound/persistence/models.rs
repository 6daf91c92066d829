//! Diesel row structs for the `users` table.
//!
//! Internal to the persistence adapter; the domain never sees these types.

use diesel::prelude::*;

use super::schema::users;

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub version: i32,
}

/// Values for a new row; `id` is assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub version: i32,
}

/// Columns overwritten by an update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub version: i32,
}
