//! In-process Session Registry
//!
//! Maps a token digest to one [`Session`]. Every request resolves its own
//! token here, so concurrent callers never share identity state. All access
//! goes through one mutex and callers only ever receive clones.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::domain::entity::{Caller, Principal, Session, SessionPolicy};
use crate::domain::value_object::session_token::{TokenDigest, digest_of};
use crate::domain::value_object::{SessionToken, UserId};

/// Presented tokens longer than this are not even hashed
const MAX_PRESENTED_TOKEN_LEN: usize = 256;

/// Snapshot of one live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct SessionRegistry {
    sessions: Mutex<HashMap<TokenDigest, Session>>,
    policy: SessionPolicy,
}

impl SessionRegistry {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            policy,
        }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Start a session for `principal` and return its token.
    pub fn create(&self, principal: Principal) -> SessionToken {
        self.create_at(principal, Utc::now())
    }

    pub fn create_at(&self, principal: Principal, now: DateTime<Utc>) -> SessionToken {
        let mut sessions = self.sessions.lock();
        loop {
            let token = SessionToken::generate();
            // A repeat of 256 random bits is not expected; never overwrite one anyway
            if let Entry::Vacant(slot) = sessions.entry(token.digest()) {
                tracing::debug!(user_id = %principal.user_id, "Session created");
                slot.insert(Session::new(principal, now));
                return token;
            }
        }
    }

    /// Identity behind `token`, if it exists and has not expired.
    pub fn resolve(&self, token: &str) -> Option<Principal> {
        self.resolve_at(token, Utc::now())
    }

    pub fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<Principal> {
        self.with_live_session(token, now, |session| session.principal.clone())
    }

    /// Resolve an optional presented token into a [`Caller`].
    pub fn caller(&self, token: Option<&str>) -> Caller {
        token.and_then(|t| self.resolve(t)).into()
    }

    /// Like [`resolve`](Self::resolve), also reporting session timing.
    pub fn inspect(&self, token: &str) -> Option<SessionView> {
        self.inspect_at(token, Utc::now())
    }

    pub fn inspect_at(&self, token: &str, now: DateTime<Utc>) -> Option<SessionView> {
        let policy = self.policy;
        self.with_live_session(token, now, |session| SessionView {
            principal: session.principal.clone(),
            created_at: session.created_at,
            expires_at: session.expires_at(&policy),
        })
    }

    /// Drop the session behind `token`. Absent or expired tokens are a no-op.
    pub fn revoke(&self, token: &str) -> bool {
        if token.len() > MAX_PRESENTED_TOKEN_LEN {
            return false;
        }
        let removed = self.sessions.lock().remove(&digest_of(token));
        if let Some(session) = &removed {
            tracing::debug!(user_id = %session.principal.user_id, "Session revoked");
        }
        removed.is_some()
    }

    /// Drop every session of `user_id` except the one behind `except`.
    pub fn revoke_all_for_user(&self, user_id: &UserId, except: Option<&str>) -> usize {
        let keep = except.map(digest_of);
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|digest, session| {
            !session.principal.owns(user_id) || keep.as_ref() == Some(digest)
        });
        before - sessions.len()
    }

    /// Remove every expired session; returns how many were removed.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let policy = self.policy;
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, &policy));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Periodically [`sweep`](Self::sweep) until the registry is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let registry: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(registry) = registry.upgrade() else {
                    break;
                };
                let evicted = registry.sweep(Utc::now());
                if evicted > 0 {
                    tracing::debug!(evicted, remaining = registry.len(), "Expired sessions swept");
                }
            }
        })
    }

    /// Run `read` on the live session behind `token`, refreshing its access
    /// time. An expired entry is evicted on the spot.
    fn with_live_session<T>(
        &self,
        token: &str,
        now: DateTime<Utc>,
        read: impl FnOnce(&Session) -> T,
    ) -> Option<T> {
        if token.is_empty() || token.len() > MAX_PRESENTED_TOKEN_LEN {
            return None;
        }

        let digest = digest_of(token);
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(&digest)?;

        if session.is_expired(now, &self.policy) {
            sessions.remove(&digest);
            return None;
        }

        session.touch(now, &self.policy);
        Some(read(session))
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(SessionPolicy::default())
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.len())
            .field("policy", &self.policy)
            .finish()
    }
}
