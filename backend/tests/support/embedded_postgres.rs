//! Embedded PostgreSQL provisioning for the Diesel adapter suites.
//!
//! Every test gets its own database on the shared cluster, created with
//! `sql/users.sql` applied and dropped when the guard goes out of scope.

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

const USERS_SCHEMA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/users.sql"));

/// Create a fresh database on the shared cluster with the users schema.
pub fn provision_users_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("shared cluster: {err:?}"))?;
    let name = format!("users_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    execute_sql(database.url(), USERS_SCHEMA)?;
    Ok(database)
}

/// Run raw SQL against `url`, bypassing the domain's validation.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
