//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the user record and its invariants, the error taxonomy
//! shared by every adapter, and the service that enforces email uniqueness
//! and version preconditions. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - [`User`], [`UserDetails`], [`UserId`], [`Version`] and friends.
//! - [`Error`] and [`ErrorCode`], the transport-agnostic failure type.
//! - [`UserService`], implementing [`ports::UsersQuery`] and
//!   [`ports::UsersCommand`].
//! - [`StaticCredentialVerifier`], the single-pair Basic credential check.

pub mod auth;
pub mod error;
pub mod ports;
pub mod precondition;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{BasicCredentials, StaticCredentialVerifier};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::precondition::VersionPrecondition;
pub use self::trace_id::TraceId;
pub use self::user::{
    EmailAddress, User, UserDetails, UserId, UserName, UserValidationError, Version,
};
pub use self::user_service::{
    DUPLICATE_EMAIL_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService, VERSION_MISMATCH_MESSAGE,
};

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
