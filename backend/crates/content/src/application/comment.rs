//! Comment Use Case
//!
//! Create and delete comments. Only the author may delete; any other
//! attempt is a silent no-op.

use std::sync::Arc;

use auth::SessionRegistry;
use kernel::bounded;

use crate::application::config::ContentConfig;
use crate::application::require_principal;
use crate::domain::entity::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::value_object::{CommentBody, CommentId};
use crate::error::{ContentError, ContentResult};

pub struct CommentUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
    sessions: Arc<SessionRegistry>,
    config: Arc<ContentConfig>,
}

impl<R> CommentUseCase<R>
where
    R: PostRepository + CommentRepository + Sync,
{
    pub fn new(repo: Arc<R>, sessions: Arc<SessionRegistry>, config: Arc<ContentConfig>) -> Self {
        Self {
            repo,
            sessions,
            config,
        }
    }

    pub async fn add(
        &self,
        session_token: Option<&str>,
        post_name: &str,
        body: &str,
    ) -> ContentResult<CommentId> {
        let principal = require_principal(&self.sessions, session_token)?;
        let body = CommentBody::new(body, self.config.max_comment_len)?;

        let post = bounded(self.config.store_timeout, self.repo.find_post_by_name(post_name))
            .await?
            .ok_or(ContentError::PostNotFound)?;

        let comment = Comment::new(post.post_id, &principal, body);
        bounded(self.config.store_timeout, self.repo.insert_comment(&comment)).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_name = %post.name,
            user_id = %principal.user_id,
            "Comment added"
        );

        Ok(comment.comment_id)
    }

    /// Returns whether a comment was removed. Callers are not told why
    /// nothing happened.
    pub async fn delete(
        &self,
        session_token: Option<&str>,
        comment_id: &CommentId,
    ) -> ContentResult<bool> {
        let Some(principal) = self.sessions.caller(session_token).into_principal() else {
            tracing::debug!(comment_id = %comment_id, "Comment delete ignored: anonymous caller");
            return Ok(false);
        };

        let comment = bounded(
            self.config.store_timeout,
            self.repo.find_comment_by_id(comment_id),
        )
        .await?;

        let Some(comment) = comment else {
            tracing::debug!(comment_id = %comment_id, "Comment delete ignored: not found");
            return Ok(false);
        };

        if !principal.owns(&comment.author_user_id) {
            tracing::debug!(
                comment_id = %comment_id,
                user_id = %principal.user_id,
                "Comment delete ignored: not the author"
            );
            return Ok(false);
        }

        // The author condition is repeated in the delete itself
        let deleted = bounded(
            self.config.store_timeout,
            self.repo.delete_comment(comment_id, &principal.user_id),
        )
        .await?;

        if deleted {
            tracing::info!(comment_id = %comment_id, user_id = %principal.user_id, "Comment deleted");
        }
        Ok(deleted)
    }
}
