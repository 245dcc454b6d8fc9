//! Repository Traits
//!
//! Comments and favorites reference posts by foreign key; a write naming a
//! missing post fails with `PersistenceError::MissingReference` carrying
//! one of the constraint names below.

use kernel::PersistenceResult;

use crate::domain::entity::{Comment, Post};
use crate::domain::value_object::{CommentId, PostId, UserId};

/// Foreign key `comments.post_id -> posts.post_id`
pub const COMMENTS_POST_ID_FKEY: &str = "comments_post_id_fkey";

/// Foreign key `favorites.post_id -> posts.post_id`
pub const FAVORITES_POST_ID_FKEY: &str = "favorites_post_id_fkey";

#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn list_posts(&self) -> PersistenceResult<Vec<Post>>;

    async fn find_post_by_name(&self, name: &str) -> PersistenceResult<Option<Post>>;
}

#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Oldest first
    async fn list_comments_by_post(&self, post_id: PostId) -> PersistenceResult<Vec<Comment>>;

    async fn insert_comment(&self, comment: &Comment) -> PersistenceResult<()>;

    async fn find_comment_by_id(&self, comment_id: &CommentId) -> PersistenceResult<Option<Comment>>;

    /// Delete only if `author_user_id` still matches; `false` if nothing was removed
    async fn delete_comment(&self, comment_id: &CommentId, author_user_id: &UserId) -> PersistenceResult<bool>;
}

#[trait_variant::make(FavoriteRepository: Send)]
pub trait LocalFavoriteRepository {
    async fn find_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool>;

    /// Idempotent; `false` if the pair already existed
    async fn insert_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool>;

    /// `false` if there was nothing to delete
    async fn delete_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool>;

    async fn list_favorites_by_user(&self, user_id: &UserId) -> PersistenceResult<Vec<PostId>>;
}
