//! Password Reset Use Case
//!
//! Lets an authenticated user replace their own password. The old password
//! is not asked for; holding a live session for the account is the proof.

use std::sync::Arc;

use kernel::bounded;
use platform::notify::{Notifier, dispatch};
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::config::AuthConfig;
use crate::application::{hash_password, notices};
use crate::domain::authorize::require_self;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::SessionRegistry;

/// Password reset use case
pub struct PasswordResetUseCase<U, N>
where
    U: UserRepository,
    N: Notifier,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
    sessions: Arc<SessionRegistry>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<U, N> PasswordResetUseCase<U, N>
where
    U: UserRepository + Sync,
    N: Notifier + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<CredentialHasher>,
        sessions: Arc<SessionRegistry>,
        notifier: Arc<N>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            sessions,
            notifier,
            config,
        }
    }

    /// May the caller open the reset form for `target_user_name`?
    pub fn authorize_page(&self, session_token: Option<&str>, target_user_name: &str) -> AuthResult<()> {
        let caller = self.sessions.caller(session_token);
        require_self(&caller, target_user_name)?;
        Ok(())
    }

    pub async fn execute(
        &self,
        session_token: Option<&str>,
        target_user_name: &str,
        new_password: String,
    ) -> AuthResult<()> {
        let caller = self.sessions.caller(session_token);
        let principal = require_self(&caller, target_user_name)?;

        let password = ClearTextPassword::new(new_password, &self.config.password_policy)?;

        let mut user = bounded(
            self.config.store_timeout,
            self.user_repo.find_by_id(&principal.user_id),
        )
        .await?
        .ok_or(AuthError::UserNotFound)?;

        let password_hash = hash_password(&self.hasher, password).await?;

        let updated = bounded(
            self.config.store_timeout,
            self.user_repo.update_password(&user.user_id, &password_hash),
        )
        .await?;
        if !updated {
            return Err(AuthError::UserNotFound);
        }
        user.set_password(password_hash);

        tracing::info!(user_id = %user.user_id, "Password changed");

        dispatch(
            Arc::clone(&self.notifier),
            notices::password_changed(&user),
            self.config.notify_timeout,
        );

        Ok(())
    }
}
