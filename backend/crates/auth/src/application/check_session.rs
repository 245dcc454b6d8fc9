//! Check Session Use Case
//!
//! Turns a presented token into the caller's identity.

use std::sync::Arc;

use crate::domain::entity::Caller;
use crate::infra::session_registry::{SessionRegistry, SessionView};

/// Check session use case
pub struct CheckSessionUseCase {
    sessions: Arc<SessionRegistry>,
}

impl CheckSessionUseCase {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    /// Resolve the caller; refreshes the session like any other access.
    pub fn caller(&self, session_token: Option<&str>) -> Caller {
        self.sessions.caller(session_token)
    }

    /// Identity and expiry of the caller's session, `None` when anonymous.
    pub fn status(&self, session_token: Option<&str>) -> Option<SessionView> {
        session_token.and_then(|token| self.sessions.inspect(token))
    }
}
