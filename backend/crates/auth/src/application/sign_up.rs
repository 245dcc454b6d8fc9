//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::bounded;
use platform::notify::{Notifier, dispatch};
use platform::password::{ClearTextPassword, CredentialHasher};

use crate::application::config::AuthConfig;
use crate::application::{hash_password, notices};
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserId, UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U, N>
where
    U: UserRepository,
    N: Notifier,
{
    user_repo: Arc<U>,
    hasher: Arc<CredentialHasher>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<U, N> SignUpUseCase<U, N>
where
    U: UserRepository + Sync,
    N: Notifier + Sync + 'static,
{
    pub fn new(
        user_repo: Arc<U>,
        hasher: Arc<CredentialHasher>,
        notifier: Arc<N>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            notifier,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let policy = &self.config.password_policy;
        let password = ClearTextPassword::new(input.password, policy);
        let confirm = ClearTextPassword::new(input.confirm_password, policy);
        // Normalization is deterministic, so exactly one side failing policy is a mismatch.
        match (&password, &confirm) {
            (Ok(password), Ok(confirm)) if password.matches(confirm) => {}
            (Err(_), Err(_)) => {}
            _ => return Err(AuthError::PasswordMismatch),
        }
        drop(confirm);

        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(&input.email)?;
        let password = password?;

        // Early, friendly answer. The unique constraints still decide races.
        let existing = bounded(
            self.config.store_timeout,
            self.user_repo.find_by_user_name_or_email(&user_name, &email),
        )
        .await?;
        if existing.iter().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }
        if !existing.is_empty() {
            return Err(AuthError::UserNameTaken);
        }

        let password_hash = hash_password(&self.hasher, password).await?;
        let user = User::new(user_name, email, password_hash);

        bounded(self.config.store_timeout, self.user_repo.insert(&user)).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        dispatch(
            Arc::clone(&self.notifier),
            notices::registration_confirmed(&user, &self.config.site_url),
            self.config.notify_timeout,
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}
