//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use platform::notify::Notifier;
use platform::password::{CredentialHasher, PasswordHashError};

use crate::application::config::AuthConfig;
use crate::application::{
    AccountUseCase, CheckSessionUseCase, PasswordResetUseCase, SignInInput, SignInUseCase,
    SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::infra::session_registry::SessionRegistry;
use crate::presentation::dto::{
    AccountResponse, LoginRequest, LoginResponse, LogoutOthersResponse, PasswordResetRequest,
    RegisterRequest, RegisterResponse, SessionStatusResponse,
};
use crate::presentation::middleware::PresentedToken;

/// Shared state for auth handlers
pub struct AuthAppState<R, N> {
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub sessions: Arc<SessionRegistry>,
    pub hasher: Arc<CredentialHasher>,
    pub config: Arc<AuthConfig>,
}

impl<R, N> AuthAppState<R, N> {
    pub fn new(
        repo: R,
        notifier: N,
        sessions: Arc<SessionRegistry>,
        config: AuthConfig,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self {
            hasher: Arc::new(config.credential_hasher()?),
            repo: Arc::new(repo),
            notifier: Arc::new(notifier),
            sessions,
            config: Arc::new(config),
        })
    }
}

// Manual impl: a derive would require `R: Clone` and `N: Clone`.
impl<R, N> Clone for AuthAppState<R, N> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            notifier: Arc::clone(&self.notifier),
            sessions: Arc::clone(&self.sessions),
            hasher: Arc::clone(&self.hasher),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Register / Login / Logout
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
    N: Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(output.session_token.as_str());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            user_id: output.principal.user_id,
            user_name: output.principal.user_name.into_inner(),
        }),
    ))
}

/// POST /api/auth/logout
pub async fn logout<R, N>(
    State(state): State<AuthAppState<R, N>>,
    token: PresentedToken,
) -> impl IntoResponse {
    SignOutUseCase::new(state.sessions.clone()).execute(token.as_deref());

    let cookie = state.config.session_cookie().build_delete_cookie();
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

/// POST /api/auth/logout/others
pub async fn logout_others<R, N>(
    State(state): State<AuthAppState<R, N>>,
    token: PresentedToken,
) -> AuthResult<Json<LogoutOthersResponse>> {
    let revoked = SignOutUseCase::new(state.sessions.clone()).execute_others(token.as_deref())?;
    Ok(Json(LogoutOthersResponse { revoked }))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R, N>(
    State(state): State<AuthAppState<R, N>>,
    token: PresentedToken,
) -> Json<SessionStatusResponse> {
    let use_case = CheckSessionUseCase::new(state.sessions.clone());

    Json(match use_case.status(token.as_deref()) {
        Some(view) => SessionStatusResponse {
            authenticated: true,
            user_id: Some(view.principal.user_id),
            user_name: Some(view.principal.user_name.into_inner()),
            expires_at: Some(view.expires_at),
        },
        None => SessionStatusResponse {
            authenticated: false,
            user_id: None,
            user_name: None,
            expires_at: None,
        },
    })
}

// ============================================================================
// Account (self only)
// ============================================================================

/// GET /api/auth/account/{user_name}
pub async fn account<R, N>(
    State(state): State<AuthAppState<R, N>>,
    token: PresentedToken,
    Path(user_name): Path<String>,
) -> AuthResult<Json<AccountResponse>>
where
    R: UserRepository + Send + Sync + 'static,
    N: Send + Sync + 'static,
{
    let use_case = AccountUseCase::new(
        state.repo.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let view = use_case.overview(token.as_deref(), &user_name).await?;

    Ok(Json(AccountResponse {
        user_id: view.user_id,
        user_name: view.user_name.into_inner(),
        email: view.email.into(),
    }))
}

/// GET /api/auth/password/{user_name}
pub async fn password_reset_page<R, N>(
    State(state): State<AuthAppState<R, N>>,
    token: PresentedToken,
    Path(user_name): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    password_reset_use_case(&state).authorize_page(token.as_deref(), &user_name)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/password/{user_name}
pub async fn password_reset<R, N>(
    State(state): State<AuthAppState<R, N>>,
    token: PresentedToken,
    Path(user_name): Path<String>,
    Json(req): Json<PasswordResetRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    password_reset_use_case(&state)
        .execute(token.as_deref(), &user_name, req.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn password_reset_use_case<R, N>(state: &AuthAppState<R, N>) -> PasswordResetUseCase<R, N>
where
    R: UserRepository + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
{
    PasswordResetUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.sessions.clone(),
        state.notifier.clone(),
        state.config.clone(),
    )
}
