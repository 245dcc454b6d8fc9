//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::authorize::require_authenticated;
use crate::error::AuthResult;
use crate::infra::session_registry::SessionRegistry;

/// Sign out use case
pub struct SignOutUseCase {
    sessions: Arc<SessionRegistry>,
}

impl SignOutUseCase {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    /// Sign out from the current session. Always succeeds.
    pub fn execute(&self, session_token: Option<&str>) {
        if let Some(token) = session_token
            && self.sessions.revoke(token)
        {
            tracing::info!("User signed out");
        }
    }

    /// Sign out from every other session of the caller
    pub fn execute_others(&self, session_token: Option<&str>) -> AuthResult<usize> {
        let caller = self.sessions.caller(session_token);
        let principal = require_authenticated(&caller)?;

        let revoked = self
            .sessions
            .revoke_all_for_user(&principal.user_id, session_token);

        tracing::info!(
            user_id = %principal.user_id,
            sessions_revoked = revoked,
            "Other sessions signed out"
        );

        Ok(revoked)
    }
}
