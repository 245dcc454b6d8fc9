//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::PersistenceError;
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::repository::{USERS_EMAIL_KEY, USERS_USER_NAME_KEY};
use crate::domain::value_object::{EmailError, UserNameError};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password validation failed: {0}")]
    PasswordValidation(#[from] PasswordPolicyError),

    #[error("Invalid user name: {0}")]
    InvalidUserName(#[from] UserNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email is already registered")]
    EmailTaken,

    #[error("User name already exists")]
    UserNameTaken,

    /// Unknown user or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No live session behind the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated, but not as the target account
    #[error("Not allowed to act on this account")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Persistence error: {0}")]
    Persistence(#[source] PersistenceError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::PasswordMismatch
            | AuthError::PasswordValidation(_)
            | AuthError::InvalidUserName(_)
            | AuthError::InvalidEmail(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken | AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Persistence(e) => e.kind(),
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures are reported generically; the detail stays in
    /// the log.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            kind if kind.is_server_error() => AppError::new(kind, "The request could not be completed")
                .with_action("Retry later"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Persistence(e) => {
                tracing::error!(error = %e, "Auth persistence error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Cross-account action rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<PersistenceError> for AuthError {
    /// Unique violations on the user table become conflicts; anything
    /// else stays a persistence failure.
    fn from(err: PersistenceError) -> Self {
        let conflict = match err.duplicate_constraint() {
            Some(USERS_EMAIL_KEY) => Some(AuthError::EmailTaken),
            Some(USERS_USER_NAME_KEY) => Some(AuthError::UserNameTaken),
            _ => None,
        };
        conflict.unwrap_or(AuthError::Persistence(err))
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
