//! List Posts Use Case

use std::collections::HashSet;
use std::sync::Arc;

use auth::SessionRegistry;
use kernel::bounded;

use crate::application::config::ContentConfig;
use crate::domain::entity::Post;
use crate::domain::repository::{FavoriteRepository, PostRepository};
use crate::domain::value_object::PostId;
use crate::error::ContentResult;

#[derive(Debug)]
pub struct PostListing {
    pub posts: Vec<Post>,
    /// Present only for authenticated callers
    pub favorites: Option<HashSet<PostId>>,
}

pub struct ListPostsUseCase<R>
where
    R: PostRepository + FavoriteRepository,
{
    repo: Arc<R>,
    sessions: Arc<SessionRegistry>,
    config: Arc<ContentConfig>,
}

impl<R> ListPostsUseCase<R>
where
    R: PostRepository + FavoriteRepository + Sync,
{
    pub fn new(repo: Arc<R>, sessions: Arc<SessionRegistry>, config: Arc<ContentConfig>) -> Self {
        Self {
            repo,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> ContentResult<PostListing> {
        let caller = self.sessions.caller(session_token);

        let posts = bounded(self.config.store_timeout, self.repo.list_posts()).await?;

        let favorites = match caller.principal() {
            Some(principal) => Some(
                bounded(
                    self.config.store_timeout,
                    self.repo.list_favorites_by_user(&principal.user_id),
                )
                .await?
                .into_iter()
                .collect(),
            ),
            None => None,
        };

        Ok(PostListing { posts, favorites })
    }
}
