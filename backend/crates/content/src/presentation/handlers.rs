//! HTTP Handlers

use std::sync::Arc;

use auth::{PresentedToken, SessionRegistry};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::CommentId;

use crate::application::{
    CommentUseCase, ContentConfig, FavoriteUseCase, GetPostUseCase, ListPostsUseCase,
};
use crate::domain::repository::{CommentRepository, FavoriteRepository, PostRepository};
use crate::domain::value_object::PostId;
use crate::error::ContentResult;
use crate::presentation::dto::{
    AddCommentRequest, AddCommentResponse, CommentResponse, FavoritesResponse, PostDetailResponse,
    PostListResponse, PostSummary,
};

/// Shared state for content handlers
pub struct ContentAppState<R> {
    pub repo: Arc<R>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Arc<ContentConfig>,
}

impl<R> ContentAppState<R> {
    pub fn new(repo: R, sessions: Arc<SessionRegistry>, config: ContentConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            sessions,
            config: Arc::new(config),
        }
    }
}

impl<R> Clone for ContentAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            sessions: Arc::clone(&self.sessions),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/content/posts
pub async fn list_posts<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
) -> ContentResult<Json<PostListResponse>>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    let use_case = ListPostsUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let listing = use_case.execute(token.as_deref()).await?;
    let favorites = listing.favorites;

    let posts = listing
        .posts
        .into_iter()
        .map(|post| PostSummary {
            favorite: favorites.as_ref().map(|set| set.contains(&post.post_id)),
            post_id: post.post_id,
            name: post.name,
            title: post.title,
        })
        .collect();

    Ok(Json(PostListResponse { posts }))
}

/// GET /api/content/posts/{name}
pub async fn get_post<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
    Path(name): Path<String>,
) -> ContentResult<Json<PostDetailResponse>>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    let detail = GetPostUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&name)
        .await?;

    let favorite = favorite_use_case(&state)
        .status(token.as_deref(), detail.post.post_id)
        .await?;

    Ok(Json(PostDetailResponse {
        favorite,
        post: detail.post.into(),
        comments: detail.comments.into_iter().map(CommentResponse::from).collect(),
    }))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/content/posts/{name}/comments
pub async fn add_comment<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
    Path(name): Path<String>,
    Json(req): Json<AddCommentRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    let comment_id = comment_use_case(&state)
        .add(token.as_deref(), &name, &req.body)
        .await?;

    Ok((StatusCode::CREATED, Json(AddCommentResponse { comment_id })))
}

/// DELETE /api/content/comments/{comment_id}
///
/// Always 204 unless the store fails; a missing or foreign comment is
/// indistinguishable from a deleted one.
pub async fn delete_comment<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
    Path(comment_id): Path<CommentId>,
) -> ContentResult<StatusCode>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    comment_use_case(&state)
        .delete(token.as_deref(), &comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn comment_use_case<R>(state: &ContentAppState<R>) -> CommentUseCase<R>
where
    R: PostRepository + CommentRepository + Send + Sync + 'static,
{
    CommentUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    )
}

// ============================================================================
// Favorites
// ============================================================================

/// GET /api/content/favorites
pub async fn list_favorites<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
) -> ContentResult<Json<FavoritesResponse>>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    let post_ids = favorite_use_case(&state).list(token.as_deref()).await?;
    Ok(Json(FavoritesResponse { post_ids }))
}

/// PUT /api/content/favorites/{post_id}
pub async fn add_favorite<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
    Path(post_id): Path<PostId>,
) -> ContentResult<StatusCode>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    favorite_use_case(&state)
        .add(token.as_deref(), post_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/content/favorites/{post_id}
pub async fn remove_favorite<R>(
    State(state): State<ContentAppState<R>>,
    token: PresentedToken,
    Path(post_id): Path<PostId>,
) -> ContentResult<StatusCode>
where
    R: PostRepository + CommentRepository + FavoriteRepository + Send + Sync + 'static,
{
    favorite_use_case(&state)
        .remove(token.as_deref(), post_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn favorite_use_case<R>(state: &ContentAppState<R>) -> FavoriteUseCase<R>
where
    R: FavoriteRepository + Send + Sync + 'static,
{
    FavoriteUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    )
}
