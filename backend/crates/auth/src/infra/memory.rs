//! In-memory user store
//!
//! Same contract as the Postgres store, including the unique constraints,
//! so services can be exercised without a database.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use kernel::{PersistenceError, PersistenceResult};
use parking_lot::RwLock;
use platform::password::HashedPassword;

use crate::domain::entity::User;
use crate::domain::repository::{USERS_EMAIL_KEY, USERS_USER_NAME_KEY, UserRepository};
use crate::domain::value_object::{Email, UserId, UserName};

#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<RwLock<Vec<User>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> PersistenceResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "memory store marked unavailable",
            ))));
        }
        Ok(())
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn find_by_id(&self, user_id: &UserId) -> PersistenceResult<Option<User>> {
        self.check_available()?;
        Ok(self.users.read().iter().find(|u| u.user_id == *user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> PersistenceResult<Option<User>> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.user_name == *user_name)
            .cloned())
    }

    async fn find_by_user_name_or_email(
        &self,
        user_name: &UserName,
        email: &Email,
    ) -> PersistenceResult<Vec<User>> {
        self.check_available()?;
        Ok(self
            .users
            .read()
            .iter()
            .filter(|u| u.user_name == *user_name || u.email == *email)
            .cloned()
            .collect())
    }

    async fn insert(&self, user: &User) -> PersistenceResult<()> {
        self.check_available()?;
        // Check and insert under one write lock, like a unique index would
        let mut users = self.users.write();
        if users.iter().any(|u| u.user_name == user.user_name) {
            return Err(PersistenceError::duplicate(USERS_USER_NAME_KEY));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(PersistenceError::duplicate(USERS_EMAIL_KEY));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: &UserId,
        password_hash: &HashedPassword,
    ) -> PersistenceResult<bool> {
        self.check_available()?;
        let mut users = self.users.write();
        match users.iter_mut().find(|u| u.user_id == *user_id) {
            Some(user) => {
                user.password_hash = password_hash.clone();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
