//! HTTP inbound adapter exposing the users REST endpoints.

pub mod auth_config;
pub mod basic_auth;
pub mod error;
pub mod health;
pub mod preconditions;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
