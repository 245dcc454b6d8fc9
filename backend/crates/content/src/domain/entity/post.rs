//! Post Entity
//!
//! Read-only from this service's point of view.

use chrono::{DateTime, Utc};

use crate::domain::value_object::PostId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    /// Unique slug, the external lookup key
    pub name: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
