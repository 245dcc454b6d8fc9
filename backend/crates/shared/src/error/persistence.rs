//! Persistence Error
//!
//! The single failure type every store implementation returns. Services
//! inspect it only for constraint names; everything else is fatal to the
//! request and propagates unchanged.

use std::error::Error;
use std::time::Duration;

use thiserror::Error;

use super::app_error::AppError;
use super::kind::ErrorKind;

/// `Result<T, PersistenceError>`
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A unique constraint rejected the write
    #[error("unique constraint `{constraint}` violated")]
    Duplicate { constraint: String },

    /// A foreign key pointed at a missing row
    #[error("foreign key `{constraint}` references a missing row")]
    MissingReference { constraint: String },

    /// The store did not answer within the deadline
    #[error("store call exceeded {0:?}")]
    Timeout(Duration),

    /// The store is reachable but cannot serve (pool exhausted, connection lost)
    #[error("store unavailable")]
    Unavailable(#[source] Box<dyn Error + Send + Sync + 'static>),

    /// Any other backend failure
    #[error("store failure")]
    Backend(#[source] Box<dyn Error + Send + Sync + 'static>),
}

impl PersistenceError {
    pub fn duplicate(constraint: impl Into<String>) -> Self {
        Self::Duplicate {
            constraint: constraint.into(),
        }
    }

    pub fn missing_reference(constraint: impl Into<String>) -> Self {
        Self::MissingReference {
            constraint: constraint.into(),
        }
    }

    pub fn backend<E>(source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(source))
    }

    /// Constraint name for `Duplicate`, if that is what this is.
    pub fn duplicate_constraint(&self) -> Option<&str> {
        match self {
            Self::Duplicate { constraint } => Some(constraint),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout(_) | Self::Unavailable(_) => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        }
    }
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        let message = match err.kind() {
            ErrorKind::ServiceUnavailable => "Storage temporarily unavailable",
            _ => "Storage failure",
        };
        AppError::new(err.kind(), message).with_source(err)
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        if matches!(
            err,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        ) {
            return Self::Unavailable(Box::new(err));
        }

        let Some((code, constraint)) = err.as_database_error().map(|db_err| {
            (
                db_err.code().map(|c| c.into_owned()),
                db_err.constraint().unwrap_or_default().to_string(),
            )
        }) else {
            return Self::Backend(Box::new(err));
        };

        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        match code.as_deref() {
            Some("23505") => Self::Duplicate { constraint },
            Some("23503") => Self::MissingReference { constraint },
            Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P02" | "57P03") => {
                Self::Unavailable(Box::new(err))
            }
            _ => Self::Backend(Box::new(err)),
        }
    }
}
