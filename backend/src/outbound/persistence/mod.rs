//! PostgreSQL persistence adapter using Diesel with async support.
//!
//! - **Thin adapter**: [`DieselUserRepository`] only translates between
//!   Diesel rows and domain types.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Lazy pooling**: [`DbPool`] wraps `bb8`, optionally over TLS.
//!
//! # Example
//!
//! ```no_run
//! use users_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users"));
//! let repo = DieselUserRepository::new(pool);
//! # }
//! ```

mod database_config;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod tls;

pub use database_config::{DatabaseSettings, PLACEHOLDER_DATABASE_URL};
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
