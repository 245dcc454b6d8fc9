//! Comment Entity

use auth::domain::value_object::UserName;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{CommentBody, CommentId, PostId, UserId};

#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub author_user_id: UserId,
    /// Snapshot taken when the comment was written
    pub author_user_name: UserName,
    pub body: CommentBody,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, author: &auth::Principal, body: CommentBody) -> Self {
        Self {
            comment_id: CommentId::new(),
            post_id,
            author_user_id: author.user_id,
            author_user_name: author.user_name.clone(),
            body,
            created_at: Utc::now(),
        }
    }
}
