//! Driven port for checking Basic credentials.

use async_trait::async_trait;

use crate::domain::{BasicCredentials, Error};

/// Decides whether presented credentials grant access.
///
/// Implementations return an [`crate::domain::ErrorCode::Unauthorized`] error
/// for rejected credentials; any other error code is treated as a failure of
/// the verifier itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Verify `credentials`.
    async fn verify(&self, credentials: &BasicCredentials) -> Result<(), Error>;
}

/// Test double accepting any credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllCredentials;

#[async_trait]
impl CredentialVerifier for AllowAllCredentials {
    async fn verify(&self, _credentials: &BasicCredentials) -> Result<(), Error> {
        Ok(())
    }
}

/// Test double rejecting every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectAllCredentials;

#[async_trait]
impl CredentialVerifier for RejectAllCredentials {
    async fn verify(&self, _credentials: &BasicCredentials) -> Result<(), Error> {
        Err(Error::unauthorized("Unauthorized"))
    }
}
