//! Account Overview Use Case

use std::sync::Arc;

use kernel::bounded;

use crate::application::config::AuthConfig;
use crate::domain::authorize::require_self;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserId, UserName};
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::SessionRegistry;

/// What an account owner sees about themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
}

pub struct AccountUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<SessionRegistry>,
    config: Arc<AuthConfig>,
}

impl<U> AccountUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<SessionRegistry>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions,
            config,
        }
    }

    /// Same self-match rule as a password reset.
    pub async fn overview(
        &self,
        session_token: Option<&str>,
        target_user_name: &str,
    ) -> AuthResult<AccountView> {
        let caller = self.sessions.caller(session_token);
        let principal = require_self(&caller, target_user_name)?;

        let user = bounded(
            self.config.store_timeout,
            self.user_repo.find_by_id(&principal.user_id),
        )
        .await?
        .ok_or(AuthError::UserNotFound)?;

        Ok(AccountView {
            user_id: user.user_id,
            user_name: user.user_name,
            email: user.email,
        })
    }
}
