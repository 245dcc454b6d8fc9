//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::notify::Notifier;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any repository and notifier
///
/// Expects [`capture_session_token`](crate::presentation::middleware::capture_session_token)
/// to run in front of it.
pub fn auth_router<R, N>(state: AuthAppState<R, N>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R, N>))
        .route("/login", post(handlers::login::<R, N>))
        .route("/logout", post(handlers::logout::<R, N>))
        .route("/logout/others", post(handlers::logout_others::<R, N>))
        .route("/status", get(handlers::session_status::<R, N>))
        .route("/account/{user_name}", get(handlers::account::<R, N>))
        .route(
            "/password/{user_name}",
            get(handlers::password_reset_page::<R, N>).post(handlers::password_reset::<R, N>),
        )
        .with_state(state)
}
