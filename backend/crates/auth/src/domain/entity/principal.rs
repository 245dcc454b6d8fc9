//! Principal and Caller
//!
//! A `Principal` is the identity a live session resolves to. `Caller` is
//! what every request carries once its token has been looked up.

use serde::Serialize;

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, UserName};

/// Authenticated identity, snapshotted when the session was created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: UserId,
    pub user_name: UserName,
}

impl Principal {
    pub fn new(user_id: UserId, user_name: UserName) -> Self {
        Self { user_id, user_name }
    }

    /// Does this identity own a resource recorded under `owner`?
    pub fn owns(&self, owner: &UserId) -> bool {
        self.user_id == *owner
    }

    /// Is this identity the account named `user_name`?
    pub fn is(&self, user_name: &str) -> bool {
        self.user_name == *user_name
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.user_id, user.user_name.clone())
    }
}

/// Resolved identity of one request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Caller {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }

    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Caller::Anonymous => None,
            Caller::Authenticated(principal) => Some(principal),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }
}

impl From<Option<Principal>> for Caller {
    fn from(principal: Option<Principal>) -> Self {
        principal.map_or(Caller::Anonymous, Caller::Authenticated)
    }
}
