//! Value Objects

pub mod comment_body;
pub mod post_id;

pub use comment_body::{CommentBody, CommentBodyError};
pub use kernel::id::{CommentId, UserId};
pub use post_id::PostId;
