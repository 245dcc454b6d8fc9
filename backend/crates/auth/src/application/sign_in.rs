//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use kernel::bounded;
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::config::AuthConfig;
use crate::application::verify_password;
use crate::domain::entity::Principal;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{SessionToken, UserName};
use crate::error::{AuthError, AuthResult};
use crate::infra::session_registry::SessionRegistry;

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: SessionToken,
    pub principal: Principal,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
    sessions: Arc<SessionRegistry>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<CredentialHasher>,
        sessions: Arc<SessionRegistry>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            sessions,
            config,
        }
    }

    /// An unknown user name costs the same hashing work as a wrong
    /// password; both end in `InvalidCredentials`.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let password = ClearTextPassword::new(input.password, &self.config.password_policy)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user = match UserName::new(&input.user_name) {
            Ok(user_name) => {
                bounded(
                    self.config.store_timeout,
                    self.user_repo.find_by_user_name(&user_name),
                )
                .await?
            }
            Err(_) => None,
        };

        let digest = user.as_ref().map(|u| u.password_hash.clone());
        let password_valid = verify_password(&self.hasher, password, digest).await?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let principal = Principal::from(&user);
        let session_token = self.sessions.create(principal.clone());

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            principal,
        })
    }
}
