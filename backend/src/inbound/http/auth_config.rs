//! Basic authentication settings parsing and validation.
//!
//! Credentials come from the environment through [`mockable::Env`] so the
//! rules below can be tested without touching the process environment.

use std::fmt;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::{BasicCredentials, StaticCredentialVerifier};

const USERNAME_ENV: &str = "USERS_API_AUTH_USERNAME";
const PASSWORD_ENV: &str = "USERS_API_AUTH_PASSWORD";
const REALM_ENV: &str = "USERS_API_AUTH_REALM";
const DEV_USERNAME: &str = "username";
const DEV_PASSWORD: &str = "password";
const DEFAULT_REALM: &str = "users";
const REALM_EXPECTED: &str = "printable text without double quotes";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to development credentials with a warning.
    Debug,
    /// Release builds require explicit credentials.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use users_api::inbound::http::auth_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating authentication configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AuthConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// The single credential pair guarding the users API, plus its realm.
#[derive(Clone)]
pub struct AuthSettings {
    username: String,
    password: Zeroizing<String>,
    realm: String,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("realm", &self.realm)
            .finish()
    }
}

impl AuthSettings {
    /// Configured username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Realm advertised in `WWW-Authenticate` challenges.
    pub fn realm(&self) -> &str {
        self.realm.as_str()
    }

    /// Verifier accepting exactly the configured pair.
    pub fn verifier(&self) -> StaticCredentialVerifier {
        StaticCredentialVerifier::new(BasicCredentials::new(
            self.username.clone(),
            self.password.as_str(),
        ))
    }
}

/// Build authentication settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use users_api::inbound::http::auth_config::{BuildMode, auth_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "USERS_API_AUTH_USERNAME" => Some("admin".to_owned()),
///     "USERS_API_AUTH_PASSWORD" => Some("s3cret".to_owned()),
///     _ => None,
/// });
///
/// let settings = auth_settings_from_env(&env, BuildMode::Release).expect("valid settings");
/// assert_eq!(settings.username(), "admin");
/// assert_eq!(settings.realm(), "users");
/// ```
pub fn auth_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<AuthSettings, AuthConfigError> {
    let username = credential_from_env(env, mode, USERNAME_ENV, DEV_USERNAME)?;
    let password = Zeroizing::new(credential_from_env(env, mode, PASSWORD_ENV, DEV_PASSWORD)?);
    let realm = realm_from_env(env)?;

    Ok(AuthSettings {
        username,
        password,
        realm,
    })
}

fn credential_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    dev_default: &str,
) -> Result<String, AuthConfigError> {
    match env.string(name).filter(|value| !value.is_empty()) {
        Some(value) => Ok(value),
        None if mode.is_debug() => {
            warn!(variable = name, "credential not set; using development default");
            Ok(dev_default.to_owned())
        }
        None => Err(AuthConfigError::MissingEnv { name }),
    }
}

fn realm_from_env<E: Env>(env: &E) -> Result<String, AuthConfigError> {
    let Some(value) = env.string(REALM_ENV) else {
        return Ok(DEFAULT_REALM.to_owned());
    };
    let valid = !value.trim().is_empty()
        && value
            .chars()
            .all(|ch| !ch.is_control() && ch != '"' && ch != '\\');
    if valid {
        Ok(value)
    } else {
        Err(AuthConfigError::InvalidEnv {
            name: REALM_ENV,
            value,
            expected: REALM_EXPECTED,
        })
    }
}
