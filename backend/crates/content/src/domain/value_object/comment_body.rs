//! Comment Body Value Object

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentBodyError {
    #[error("Comment cannot be empty")]
    Empty,

    #[error("Comment is too long ({actual} chars, maximum {max})")]
    TooLong { max: usize, actual: usize },
}

/// Trimmed, non-empty comment text within the configured length
#[derive(Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    pub fn new(raw: &str, max_len: usize) -> Result<Self, CommentBodyError> {
        let body = raw.trim();
        if body.is_empty() {
            return Err(CommentBodyError::Empty);
        }

        let actual = body.chars().count();
        if actual > max_len {
            return Err(CommentBodyError::TooLong {
                max: max_len,
                actual,
            });
        }

        Ok(Self(body.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for CommentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommentBody({} chars)", self.0.chars().count())
    }
}
