//! Get Post Use Case
//!
//! Public: no session needed.

use std::sync::Arc;

use kernel::bounded;

use crate::application::config::ContentConfig;
use crate::domain::entity::{Comment, Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{ContentError, ContentResult};

#[derive(Debug)]
pub struct PostDetail {
    pub post: Post,
    /// Oldest first
    pub comments: Vec<Comment>,
}

pub struct GetPostUseCase<R>
where
    R: PostRepository + CommentRepository,
{
    repo: Arc<R>,
    config: Arc<ContentConfig>,
}

impl<R> GetPostUseCase<R>
where
    R: PostRepository + CommentRepository + Sync,
{
    pub fn new(repo: Arc<R>, config: Arc<ContentConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, name: &str) -> ContentResult<PostDetail> {
        let post = bounded(self.config.store_timeout, self.repo.find_post_by_name(name))
            .await?
            .ok_or(ContentError::PostNotFound)?;

        let comments = bounded(
            self.config.store_timeout,
            self.repo.list_comments_by_post(post.post_id),
        )
        .await?;

        Ok(PostDetail { post, comments })
    }
}
