//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the PostgreSQL-backed user repository using Diesel.
//!
//! Adapters are thin translators between domain types and storage rows.
//! They contain no business logic.

pub mod persistence;
