//! Authentication primitives for the single configured Basic credential.
//!
//! Header decoding stays in the inbound adapter; this module only holds the
//! credential values and the constant-time comparison against the configured
//! pair.

use std::fmt;

use async_trait::async_trait;
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::Zeroizing;

use super::Error;
use super::ports::CredentialVerifier;

/// Username and password presented by a caller.
///
/// The password is wiped from memory when the value is dropped.
///
/// # Examples
/// ```
/// use users_api::domain::BasicCredentials;
///
/// let creds = BasicCredentials::new("username", "password");
/// assert_eq!(creds.username(), "username");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl BasicCredentials {
    /// Wrap a username/password pair without altering either value.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Username as supplied.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Verifier accepting exactly one configured username/password pair.
///
/// Both fields are compared in constant time and both comparisons always
/// run, so timing does not reveal which field differed.
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    expected: BasicCredentials,
}

impl StaticCredentialVerifier {
    /// Build a verifier for the given pair.
    pub fn new(expected: BasicCredentials) -> Self {
        Self { expected }
    }

    fn matches(&self, presented: &BasicCredentials) -> bool {
        let username = presented
            .username()
            .as_bytes()
            .ct_eq(self.expected.username().as_bytes());
        let password = presented
            .password()
            .as_bytes()
            .ct_eq(self.expected.password().as_bytes());
        (username & password).into()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, credentials: &BasicCredentials) -> Result<(), Error> {
        if self.matches(credentials) {
            Ok(())
        } else {
            warn!(username = credentials.username(), "rejected basic credentials");
            Err(Error::unauthorized("Unauthorized"))
        }
    }
}
