//! Repository Traits
//!
//! Interfaces for user persistence. Uniqueness of `user_name` and `email` is
//! enforced by the store itself; implementations report a violation as
//! `PersistenceError::Duplicate` naming one of the constraints below.

use kernel::PersistenceResult;
use platform::password::HashedPassword;

use crate::domain::entity::User;
use crate::domain::value_object::{Email, UserId, UserName};

/// Unique constraint on `users.user_name`
pub const USERS_USER_NAME_KEY: &str = "users_user_name_key";

/// Unique constraint on `users.email`
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> PersistenceResult<Option<User>>;

    /// Find user by user name (exact, case-sensitive)
    async fn find_by_user_name(&self, user_name: &UserName) -> PersistenceResult<Option<User>>;

    /// Every user whose name or email collides with the pair
    async fn find_by_user_name_or_email(
        &self,
        user_name: &UserName,
        email: &Email,
    ) -> PersistenceResult<Vec<User>>;

    /// Insert a new user
    async fn insert(&self, user: &User) -> PersistenceResult<()>;

    /// Replace the password digest; `false` if no such user
    async fn update_password(
        &self,
        user_id: &UserId,
        password_hash: &HashedPassword,
    ) -> PersistenceResult<bool>;
}
