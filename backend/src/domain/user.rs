//! User data model.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use utoipa::ToSchema;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was not a 32-bit integer.
    #[error("user id must be an integer")]
    InvalidId,
    /// The name was missing or empty.
    #[error("name must not be empty")]
    EmptyName,
    /// The email was missing or empty.
    #[error("email must not be empty")]
    EmptyEmail,
}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap an identifier assigned by storage.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>()
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name for a user. Never empty; whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }

    /// Borrow the raw value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Email address for a user. Never empty; uniqueness is owned by storage.
///
/// No format validation is applied beyond the non-empty check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the raw value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Optimistic concurrency token. New users start at [`Version::INITIAL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Version(i32);

impl Version {
    /// Version assigned to freshly inserted users.
    pub const INITIAL: Self = Self(1);

    /// Wrap a stored version.
    pub const fn new(version: i32) -> Self {
        Self(version)
    }

    /// Raw integer value.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// The version written by a successful update, or `None` on overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Opaque token exchanged with clients.
    pub fn token(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated name/email pair supplied on create and update.
///
/// # Examples
/// ```
/// use users_api::domain::UserDetails;
///
/// let details = UserDetails::try_from_parts(Some("Ann"), Some("ann@example.com")).unwrap();
/// assert_eq!(details.email().as_ref(), "ann@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserDetails {
    #[schema(value_type = String, example = "Ann")]
    name: UserName,
    #[schema(value_type = String, example = "ann@example.com")]
    email: EmailAddress,
}

impl UserDetails {
    /// Build details from validated parts.
    pub fn new(name: UserName, email: EmailAddress) -> Self {
        Self { name, email }
    }

    /// Validate optional raw inputs; both must be present and non-empty.
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        let name = UserName::new(name.unwrap_or_default())?;
        let email = EmailAddress::new(email.unwrap_or_default())?;
        Ok(Self { name, email })
    }

    /// User's display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// User's email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Persisted user record.
///
/// Serialises as `{"id", "name", "email", "version"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    #[schema(value_type = i32, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "Ann")]
    name: UserName,
    #[schema(value_type = String, example = "ann@example.com")]
    email: EmailAddress,
    #[schema(value_type = i32, example = 1)]
    version: Version,
}

impl User {
    /// Assemble a user from its parts.
    pub fn new(id: UserId, details: UserDetails, version: Version) -> Self {
        let UserDetails { name, email } = details;
        Self {
            id,
            name,
            email,
            version,
        }
    }

    /// Rebuild a user from a stored row.
    ///
    /// Stored values are trusted as written: rows predating the current
    /// validation rules still load.
    pub fn from_stored(id: UserId, name: String, email: String, version: Version) -> Self {
        Self {
            id,
            name: UserName(name),
            email: EmailAddress(email),
            version,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Current concurrency token.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Name and email as a [`UserDetails`] value.
    pub fn details(&self) -> UserDetails {
        UserDetails::new(self.name.clone(), self.email.clone())
    }
}
