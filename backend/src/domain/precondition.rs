//! Version precondition supplied by clients on update.

use super::Version;

/// What the caller asserted about the stored version.
///
/// # Examples
/// ```
/// use users_api::domain::{Version, VersionPrecondition};
///
/// let precondition = VersionPrecondition::OneOf(vec!["2".to_owned()]);
/// assert!(precondition.is_satisfied_by(Version::new(2)));
/// assert!(!precondition.is_satisfied_by(Version::new(3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionPrecondition {
    /// No token was supplied. Never satisfied.
    Absent,
    /// Wildcard: any existing version is accepted.
    Any,
    /// Strong tokens, one of which must equal the stored version.
    OneOf(Vec<String>),
}

impl VersionPrecondition {
    /// Whether the stored `version` meets the precondition.
    pub fn is_satisfied_by(&self, version: Version) -> bool {
        match self {
            Self::Absent => false,
            Self::Any => true,
            Self::OneOf(tokens) => {
                let current = version.token();
                tokens.iter().any(|token| *token == current)
            }
        }
    }
}
