//! Owner identity resolved from a bearer token.
//!
//! Identity providers hand out opaque subject strings (`user_2ab…`, e-mail
//! addresses, UUIDs), so the domain keeps the value as text and only checks
//! that it is usable as an ownership key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length of a user identifier, in characters.
pub const USER_ID_MAX: usize = 255;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier carried leading or trailing whitespace.
    SurroundingWhitespace,
    /// The identifier exceeded [`USER_ID_MAX`] characters.
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "user id must not start or end with whitespace")
            }
            Self::TooLong { max } => write!(f, "user id must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Opaque identifier of the user owning a record.
///
/// # Examples
/// ```
/// use pantry::domain::UserId;
///
/// let id = UserId::new("user_2abc").expect("valid id");
/// assert_eq!(id.as_str(), "user_2abc");
/// assert!(UserId::new(" padded ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::SurroundingWhitespace);
        }
        if id.chars().count() > USER_ID_MAX {
            return Err(UserIdValidationError::TooLong { max: USER_ID_MAX });
        }
        Ok(Self(id))
    }

    /// Borrow the identifier as text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
