//! PostgreSQL Repository Implementations

use auth::domain::value_object::UserName;
use chrono::{DateTime, Utc};
use kernel::{PersistenceError, PersistenceResult};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Comment, Post};
use crate::domain::repository::{CommentRepository, FavoriteRepository, PostRepository};
use crate::domain::value_object::{CommentBody, CommentId, PostId, UserId};

/// PostgreSQL-backed store for posts, comments and favorites
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgContentRepository {
    async fn list_posts(&self) -> PersistenceResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, name, title, body, created_at
            FROM posts
            ORDER BY post_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_post_by_name(&self, name: &str) -> PersistenceResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT post_id, name, title, body, created_at
            FROM posts
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgContentRepository {
    async fn list_comments_by_post(&self, post_id: PostId) -> PersistenceResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                author_user_id,
                author_user_name,
                body,
                created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY comment_seq
            "#,
        )
        .bind(post_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn insert_comment(&self, comment: &Comment) -> PersistenceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                author_user_id,
                author_user_name,
                body,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.value())
        .bind(comment.author_user_id.as_uuid())
        .bind(comment.author_user_name.as_str())
        .bind(comment.body.as_str())
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comment_by_id(&self, comment_id: &CommentId) -> PersistenceResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                author_user_id,
                author_user_name,
                body,
                created_at
            FROM comments
            WHERE comment_id = $1
            "#,
        )
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn delete_comment(&self, comment_id: &CommentId, author_user_id: &UserId) -> PersistenceResult<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE comment_id = $1 AND author_user_id = $2
            "#,
        )
        .bind(comment_id.as_uuid())
        .bind(author_user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(PersistenceError::from)?
        .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Favorite Repository Implementation
// ============================================================================

impl FavoriteRepository for PgContentRepository {
    async fn find_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool> {
        let found: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM favorites WHERE user_id = $1 AND post_id = $2
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(post_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    async fn insert_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, post_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, post_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(post_id.value())
        .execute(&self.pool)
        .await
        .map_err(PersistenceError::from)?
        .rows_affected();

        Ok(inserted > 0)
    }

    async fn delete_favorite(&self, user_id: &UserId, post_id: PostId) -> PersistenceResult<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(post_id.value())
        .execute(&self.pool)
        .await
        .map_err(PersistenceError::from)?
        .rows_affected();

        Ok(deleted > 0)
    }

    async fn list_favorites_by_user(&self, user_id: &UserId) -> PersistenceResult<Vec<PostId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT post_id FROM favorites
            WHERE user_id = $1
            ORDER BY post_id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(PostId::new).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: i64,
    name: String,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::new(self.post_id),
            name: self.name,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: i64,
    author_user_id: Uuid,
    author_user_name: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::new(self.post_id),
            author_user_id: UserId::from_uuid(self.author_user_id),
            author_user_name: UserName::from_db(self.author_user_name),
            body: CommentBody::from_db(self.body),
            created_at: self.created_at,
        }
    }
}
