//! Content Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::PersistenceError;
use thiserror::Error;

use crate::domain::repository::{COMMENTS_POST_ID_FKEY, FAVORITES_POST_ID_FKEY};
use crate::domain::value_object::CommentBodyError;

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// Mutation attempted without a live session
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Comment is too long ({actual} chars, maximum {max})")]
    CommentTooLong { max: usize, actual: usize },

    #[error("Persistence error: {0}")]
    Persistence(#[source] PersistenceError),
}

impl ContentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Unauthenticated => ErrorKind::Unauthorized,
            ContentError::PostNotFound => ErrorKind::NotFound,
            ContentError::EmptyComment | ContentError::CommentTooLong { .. } => ErrorKind::BadRequest,
            ContentError::Persistence(e) => e.kind(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ContentError::Persistence(_) => AppError::new(self.kind(), "The request could not be completed")
                .with_action("Retry later"),
            ContentError::Unauthenticated => {
                AppError::new(self.kind(), self.to_string()).with_action("Log in and retry")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ContentError::Persistence(e) => {
                tracing::error!(error = %e, "Content persistence error");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl From<PersistenceError> for ContentError {
    /// A dangling post reference means the post does not exist.
    fn from(err: PersistenceError) -> Self {
        let dangling_post = matches!(
            &err,
            PersistenceError::MissingReference { constraint }
                if constraint == COMMENTS_POST_ID_FKEY || constraint == FAVORITES_POST_ID_FKEY
        );
        if dangling_post {
            ContentError::PostNotFound
        } else {
            ContentError::Persistence(err)
        }
    }
}

impl From<CommentBodyError> for ContentError {
    fn from(err: CommentBodyError) -> Self {
        match err {
            CommentBodyError::Empty => ContentError::EmptyComment,
            CommentBodyError::TooLong { max, actual } => ContentError::CommentTooLong { max, actual },
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
