//! Content Router

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::domain::repository::{CommentRepository, FavoriteRepository, PostRepository};
use crate::presentation::handlers::{self, ContentAppState};

/// Create the Content router for any store implementing all three contracts
pub fn content_router<R>(state: ContentAppState<R>) -> Router
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/posts", get(handlers::list_posts::<R>))
        .route("/posts/{name}", get(handlers::get_post::<R>))
        .route("/posts/{name}/comments", post(handlers::add_comment::<R>))
        .route("/comments/{comment_id}", delete(handlers::delete_comment::<R>))
        .route("/favorites", get(handlers::list_favorites::<R>))
        .route(
            "/favorites/{post_id}",
            put(handlers::add_favorite::<R>).delete(handlers::remove_favorite::<R>),
        )
        .with_state(state)
}
