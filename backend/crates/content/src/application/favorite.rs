//! Favorite Use Case

use std::sync::Arc;

use auth::SessionRegistry;
use kernel::bounded;

use crate::application::config::ContentConfig;
use crate::application::require_principal;
use crate::domain::repository::FavoriteRepository;
use crate::domain::value_object::PostId;
use crate::error::ContentResult;

pub struct FavoriteUseCase<R>
where
    R: FavoriteRepository,
{
    repo: Arc<R>,
    sessions: Arc<SessionRegistry>,
    config: Arc<ContentConfig>,
}

impl<R> FavoriteUseCase<R>
where
    R: FavoriteRepository + Sync,
{
    pub fn new(repo: Arc<R>, sessions: Arc<SessionRegistry>, config: Arc<ContentConfig>) -> Self {
        Self {
            repo,
            sessions,
            config,
        }
    }

    /// Idempotent. The store's primary key keeps concurrent adds to one row.
    pub async fn add(&self, session_token: Option<&str>, post_id: PostId) -> ContentResult<()> {
        let principal = require_principal(&self.sessions, session_token)?;

        let inserted = bounded(
            self.config.store_timeout,
            self.repo.insert_favorite(&principal.user_id, post_id),
        )
        .await?;

        if inserted {
            tracing::info!(user_id = %principal.user_id, post_id = %post_id, "Favorite added");
        }
        Ok(())
    }

    /// Removing a favorite that does not exist is fine.
    pub async fn remove(&self, session_token: Option<&str>, post_id: PostId) -> ContentResult<()> {
        let principal = require_principal(&self.sessions, session_token)?;

        let deleted = bounded(
            self.config.store_timeout,
            self.repo.delete_favorite(&principal.user_id, post_id),
        )
        .await?;

        if deleted {
            tracing::info!(user_id = %principal.user_id, post_id = %post_id, "Favorite removed");
        }
        Ok(())
    }

    pub async fn list(&self, session_token: Option<&str>) -> ContentResult<Vec<PostId>> {
        let principal = require_principal(&self.sessions, session_token)?;

        Ok(bounded(
            self.config.store_timeout,
            self.repo.list_favorites_by_user(&principal.user_id),
        )
        .await?)
    }

    /// Whether the caller has favorited `post_id`; `None` for anonymous callers.
    pub async fn status(&self, session_token: Option<&str>, post_id: PostId) -> ContentResult<Option<bool>> {
        let Some(principal) = self.sessions.caller(session_token).into_principal() else {
            return Ok(None);
        };

        let found = bounded(
            self.config.store_timeout,
            self.repo.find_favorite(&principal.user_id, post_id),
        )
        .await?;
        Ok(Some(found))
    }
}
