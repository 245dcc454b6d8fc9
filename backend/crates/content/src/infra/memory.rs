//! In-memory content store
//!
//! Enforces the same foreign keys and favorite primary key as the
//! Postgres schema.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kernel::{PersistenceError, PersistenceResult};
use parking_lot::RwLock;

use crate::domain::entity::{Comment, Favorite, Post};
use crate::domain::repository::{
    COMMENTS_POST_ID_FKEY, CommentRepository, FAVORITES_POST_ID_FKEY, FavoriteRepository,
    PostRepository,
};
use crate::domain::value_object::{CommentId, PostId, UserId};

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    /// Insertion order is creation order
    comments: Vec<Comment>,
    favorites: Vec<Favorite>,
}

impl State {
    fn has_post(&self, post_id: PostId) -> bool {
        self.posts.iter().any(|p| p.post_id == post_id)
    }
}

#[derive(Clone, Default)]
pub struct MemoryContentRepository {
    state: Arc<RwLock<State>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a post. Replaces any post with the same id or name.
    pub fn insert_post(&self, post_id: i64, name: &str, title: &str, body: &str) -> Post {
        let post = Post {
            post_id: PostId::new(post_id),
            name: name.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };

        let mut state = self.state.write();
        state
            .posts
            .retain(|p| p.post_id != post.post_id && p.name != post.name);
        state.posts.push(post.clone());
        post
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn comment_count(&self) -> usize {
        self.state.read().comments.len()
    }

    pub fn favorite_count(&self) -> usize {
        self.state.read().favorites.len()
    }

    fn check_available(&self) -> PersistenceResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "memory store marked unavailable",
            ))));
        }
        Ok(())
    }
}

impl PostRepository for MemoryContentRepository {
    async fn list_posts(&self) -> PersistenceResult<Vec<Post>> {
        self.check_available()?;
        let mut posts = self.state.read().posts.clone();
        posts.sort_by_key(|p| p.post_id);
        Ok(posts)
    }

    async fn find_post_by_name(&self, name: &str) -> PersistenceResult<Option<Post>> {
        self.check_available()?;
        Ok(self.state.read().posts.iter().find(|p| p.name == name).cloned())
    }
}

impl CommentRepository for MemoryContentRepository {
    async fn list_comments_by_post(&self, post_id: PostId) -> PersistenceResult<Vec<Comment>> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: &Comment) -> PersistenceResult<()> {
        self.check_available()?;
        let mut state = self.state.write();
        if !state.has_post(comment.post_id) {
            return Err(PersistenceError::missing_reference(COMMENTS_POST_ID_FKEY));
        }
        if state.comments.iter().any(|c| c.comment_id == comment.comment_id) {
            return Err(PersistenceError::duplicate("comments_pkey"));
        }
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn find_comment_by_id(&self, comment_id: &CommentId) -> PersistenceResult<Option<Comment>> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .comments
            .iter()
            .find(|c| c.comment_id == *comment_id)
            .cloned())
    }

    async fn delete_comment(&self, comment_id: &CommentId, author_user_id: &UserId) -> PersistenceResult<bool> {
        self.check_available()?;
        let mut state = self.state.write();
        let before = state.comments.len();
        state
            .comments
            .retain(|c| !(c.comment_id == *comment_id && c.author_user_id == *author_user_id));
        Ok(state.comments.len() < before)
    }
}

impl FavoriteRepository for MemoryContentRepository {
    async fn find_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool> {
        self.check_available()?;
        let wanted = Favorite {
            user_id: *user_id,
            post_id,
        };
        Ok(self.state.read().favorites.contains(&wanted))
    }

    async fn insert_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool> {
        self.check_available()?;
        let mut state = self.state.write();
        if !state.has_post(post_id) {
            return Err(PersistenceError::missing_reference(FAVORITES_POST_ID_FKEY));
        }
        let favorite = Favorite {
            user_id: *user_id,
            post_id,
        };
        if state.favorites.contains(&favorite) {
            return Ok(false);
        }
        state.favorites.push(favorite);
        Ok(true)
    }

    async fn delete_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool> {
        self.check_available()?;
        let mut state = self.state.write();
        let before = state.favorites.len();
        state
            .favorites
            .retain(|f| !(f.user_id == *user_id && f.post_id == post_id));
        Ok(state.favorites.len() < before)
    }

    async fn list_favorites_by_user(&self, user_id: &UserId) -> PersistenceResult<Vec<PostId>> {
        self.check_available()?;
        let mut post_ids: Vec<PostId> = self
            .state
            .read()
            .favorites
            .iter()
            .filter(|f| f.user_id == *user_id)
            .map(|f| f.post_id)
            .collect();
        post_ids.sort();
        Ok(post_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::CommentBody;
    use auth::Principal;
    use auth::domain::value_object::UserName;

    fn principal(name: &str) -> Principal {
        Principal::new(UserId::new(), UserName::new(name).unwrap())
    }

    fn comment(post_id: i64, author: &Principal, text: &str) -> Comment {
        Comment::new(PostId::new(post_id), author, CommentBody::new(text, 100).unwrap())
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let repo = MemoryContentRepository::new();
        let bob = principal("bob");

        let err = repo.insert_comment(&comment(1, &bob, "hi")).await.unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::MissingReference { ref constraint } if constraint == COMMENTS_POST_ID_FKEY
        ));

        repo.insert_post(1, "first", "First", "...");
        repo.insert_comment(&comment(1, &bob, "hi")).await.unwrap();
        assert_eq!(repo.comment_count(), 1);
    }

    #[tokio::test]
    async fn test_comments_keep_creation_order() {
        let repo = MemoryContentRepository::new();
        repo.insert_post(1, "first", "First", "...");
        let bob = principal("bob");

        for text in ["one", "two", "three"] {
            repo.insert_comment(&comment(1, &bob, text)).await.unwrap();
        }

        let bodies: Vec<String> = repo
            .list_comments_by_post(PostId::new(1))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.body.into_inner())
            .collect();
        assert_eq!(bodies, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_delete_comment_checks_author() {
        let repo = MemoryContentRepository::new();
        repo.insert_post(1, "first", "First", "...");
        let bob = principal("bob");
        let eve = principal("eve");
        let c = comment(1, &bob, "mine");
        repo.insert_comment(&c).await.unwrap();

        assert!(!repo.delete_comment(&c.comment_id, &eve.user_id).await.unwrap());
        assert_eq!(repo.comment_count(), 1);
        assert!(repo.delete_comment(&c.comment_id, &bob.user_id).await.unwrap());
        assert_eq!(repo.comment_count(), 0);
    }

    #[tokio::test]
    async fn test_favorites_are_a_set() {
        let repo = MemoryContentRepository::new();
        repo.insert_post(7, "seven", "Seven", "...");
        let user = UserId::new();

        assert!(repo.insert_favorite(&user, PostId::new(7)).await.unwrap());
        assert!(!repo.insert_favorite(&user, PostId::new(7)).await.unwrap());
        assert_eq!(repo.favorite_count(), 1);
        assert!(repo.find_favorite(&user, PostId::new(7)).await.unwrap());

        assert!(repo.delete_favorite(&user, PostId::new(7)).await.unwrap());
        assert!(!repo.delete_favorite(&user, PostId::new(7)).await.unwrap());
    }

    #[tokio::test]
    async fn test_favorite_on_missing_post() {
        let repo = MemoryContentRepository::new();
        let err = repo
            .insert_favorite(&UserId::new(), PostId::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, PersistenceError::MissingReference { .. }));
    }

    #[tokio::test]
    async fn test_unavailable() {
        let repo = MemoryContentRepository::new();
        repo.set_unavailable(true);
        assert!(matches!(
            repo.list_posts().await,
            Err(PersistenceError::Unavailable(_))
        ));
    }
}
