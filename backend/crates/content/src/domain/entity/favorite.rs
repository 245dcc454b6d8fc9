//! Favorite Entity

use crate::domain::value_object::{PostId, UserId};

/// Existence is the whole payload; at most one per (user, post)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Favorite {
    pub user_id: UserId,
    pub post_id: PostId,
}
