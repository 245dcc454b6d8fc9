//! User Name Value Object
//!
//! The public handle a user logs in with and is addressed by in URLs
//! (`/account/{user_name}`). Comparison is case-sensitive: `Alice` and
//! `alice` are different accounts.
//!
//! ## Invariants
//! - NFKC-normalized and trimmed
//! - 1 to 32 characters
//! - No whitespace, no control characters
//! - No URL-structural characters (`/ ? # %`)

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 1;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 32;

/// Characters that would break path-based addressing
const FORBIDDEN_CHARS: &[char] = &['/', '?', '#', '%', '\\'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("User name cannot contain whitespace")]
    ContainsWhitespace,

    #[error("Invalid character {char:?} at position {position}")]
    InvalidCharacter { char: char, position: usize },
}

/// Validated, normalized user name
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = Self::normalize(input.as_ref());
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    /// Rebuild from a stored value (already validated on the way in)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::Empty);
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (position, ch) in name.chars().enumerate() {
            if ch.is_whitespace() {
                return Err(UserNameError::ContainsWhitespace);
            }
            if ch.is_control() || FORBIDDEN_CHARS.contains(&ch) {
                return Err(UserNameError::InvalidCharacter { char: ch, position });
            }
        }

        Ok(())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserName::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl PartialEq<str> for UserName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["a", "alice", "Bob_99", "el.niño", "user-name+tag"] {
            assert!(UserName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_trimmed() {
        let name = UserName::new("  alice \n").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_case_is_preserved_and_significant() {
        let upper = UserName::new("Alice").unwrap();
        let lower = UserName::new("alice").unwrap();
        assert_eq!(upper.as_str(), "Alice");
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters fold to ASCII
        let name = UserName::new("ａｌｉｃｅ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_length_limit() {
        assert!(UserName::new("a".repeat(32)).is_ok());
        assert_eq!(
            UserName::new("a".repeat(33)),
            Err(UserNameError::TooLong { length: 33, max: 32 })
        );
    }

    #[test]
    fn test_inner_whitespace_rejected() {
        assert_eq!(UserName::new("al ice"), Err(UserNameError::ContainsWhitespace));
    }

    #[test]
    fn test_structural_characters_rejected() {
        assert!(matches!(
            UserName::new("a/b"),
            Err(UserNameError::InvalidCharacter { char: '/', position: 1 })
        ));
        assert!(UserName::new("a\u{0007}b").is_err());
        assert!(UserName::new("what?").is_err());
    }

    #[test]
    fn test_serde_validates() {
        let name: UserName = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(name.as_str(), "bob");
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
    }
}
