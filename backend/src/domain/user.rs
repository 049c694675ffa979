//! User data model.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::SessionId;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Human readable user name, stored as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Construct a [`UserName`], rejecting the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, a non-empty local part, and a dotted domain without spaces.
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid e-mail address, trimmed and compared verbatim.
///
/// # Examples
/// ```
/// use diet_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new(" ada@example.com ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered user.
///
/// Users are created once by registration and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    session_id: SessionId,
    name: UserName,
    email: EmailAddress,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for constructing a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub session_id: SessionId,
    pub name: UserName,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user from validated components.
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            session_id,
            name,
            email,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            session_id,
            name,
            email,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// Session the user registered under.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn user_name_rejects_empty() {
        assert_eq!(UserName::new(""), Err(UserValidationError::EmptyName));
    }

    #[rstest]
    #[case("  Ada Lovelace ")]
    #[case(" ")]
    fn user_name_keeps_text_verbatim(#[case] raw: &str) {
        let name = UserName::new(raw).expect("non-empty name");
        assert_eq!(name.as_ref(), raw);
    }

    #[rstest]
    fn user_name_has_no_length_limit() {
        let raw = "a".repeat(500);
        assert!(UserName::new(raw).is_ok());
    }

    #[rstest]
    #[case("ada@example.com")]
    #[case("ada.lovelace+meals@mail.example.org")]
    fn email_accepts_valid_addresses(#[case] raw: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("ada", UserValidationError::InvalidEmail)]
    #[case("ada@", UserValidationError::InvalidEmail)]
    #[case("ada@example", UserValidationError::InvalidEmail)]
    #[case("ada lovelace@example.com", UserValidationError::InvalidEmail)]
    #[case("ada@@example.com", UserValidationError::InvalidEmail)]
    fn email_rejects_invalid_addresses(
        #[case] raw: &str,
        #[case] expected: UserValidationError,
    ) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }

    #[rstest]
    fn email_deserialises_through_validation() {
        let result: Result<EmailAddress, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
