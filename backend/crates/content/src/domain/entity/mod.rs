//! Entities

pub mod comment;
pub mod favorite;
pub mod post;

pub use comment::Comment;
pub use favorite::Favorite;
pub use post::Post;
