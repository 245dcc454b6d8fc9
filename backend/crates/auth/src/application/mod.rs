//! Application Layer
//!
//! Use cases and application services.

pub mod account;
pub mod check_session;
pub mod config;
pub mod notices;
pub mod password_reset;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use std::sync::Arc;

use platform::password::{ClearTextPassword, CredentialHasher, HashedPassword};

use crate::error::{AuthError, AuthResult};

// Re-exports
pub use account::{AccountUseCase, AccountView};
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use password_reset::PasswordResetUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};

/// Argon2 is CPU-bound; keep it off the async workers.
pub(crate) async fn hash_password(
    hasher: &Arc<CredentialHasher>,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))?
        .map_err(AuthError::from)
}

/// `None` digest means "no such account": the dummy verification still runs.
pub(crate) async fn verify_password(
    hasher: &Arc<CredentialHasher>,
    password: ClearTextPassword,
    digest: Option<HashedPassword>,
) -> AuthResult<bool> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || match digest {
        Some(digest) => hasher.verify(&password, &digest),
        None => hasher.verify_absent(&password),
    })
    .await
    .map_err(|e| AuthError::Internal(format!("verification task failed: {e}")))
}
