//! API DTOs

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Comment, Post};
use crate::domain::value_object::PostId;

// ============================================================================
// Posts
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub post_id: PostId,
    pub name: String,
    pub title: String,
    /// `None` for anonymous callers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: PostId,
    pub name: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            post_id: post.post_id,
            name: post.name,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: CommentId,
    pub author_user_id: UserId,
    pub author_user_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.comment_id,
            author_user_id: comment.author_user_id,
            author_user_name: comment.author_user_name.into_inner(),
            body: comment.body.into_inner(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentResponse {
    pub comment_id: CommentId,
}

// ============================================================================
// Favorites
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesResponse {
    pub post_ids: Vec<PostId>,
}
