//! Session Entity
//!
//! Lives only in the in-process registry; never persisted.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::principal::Principal;

/// Expiry rules applied to every session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Maximum gap between two accesses
    pub idle_timeout: Duration,
    /// Hard cap measured from creation, regardless of activity
    pub max_lifetime: Option<Duration>,
    /// Whether `resolve` refreshes `last_access_at`
    pub sliding: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::minutes(30),
            max_lifetime: Some(Duration::hours(12)),
            sliding: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub principal: Principal,
    pub created_at: DateTime<Utc>,
    pub last_access_at: DateTime<Utc>,
}

impl Session {
    pub fn new(principal: Principal, now: DateTime<Utc>) -> Self {
        Self {
            principal,
            created_at: now,
            last_access_at: now,
        }
    }

    /// Instant after which the session no longer resolves. A deadline past
    /// the representable range saturates to "never".
    pub fn expires_at(&self, policy: &SessionPolicy) -> DateTime<Utc> {
        let idle_deadline = deadline(self.last_access_at, policy.idle_timeout);
        match policy.max_lifetime {
            Some(lifetime) => idle_deadline.min(deadline(self.created_at, lifetime)),
            None => idle_deadline,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, policy: &SessionPolicy) -> bool {
        now >= self.expires_at(policy)
    }

    /// Record an access (no-op unless the policy slides)
    pub fn touch(&mut self, now: DateTime<Utc>, policy: &SessionPolicy) {
        if policy.sliding && now > self.last_access_at {
            self.last_access_at = now;
        }
    }
}

fn deadline(from: DateTime<Utc>, after: Duration) -> DateTime<Utc> {
    from.checked_add_signed(after).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{UserId, UserName};

    fn session(now: DateTime<Utc>) -> Session {
        Session::new(
            Principal::new(UserId::new(), UserName::new("bob").unwrap()),
            now,
        )
    }

    fn policy(sliding: bool, max_lifetime: Option<Duration>) -> SessionPolicy {
        SessionPolicy {
            idle_timeout: Duration::minutes(30),
            max_lifetime,
            sliding,
        }
    }

    #[test]
    fn test_idle_expiry() {
        let start = Utc::now();
        let s = session(start);
        let p = policy(true, None);

        assert!(!s.is_expired(start + Duration::minutes(29), &p));
        assert!(s.is_expired(start + Duration::minutes(30), &p));
    }

    #[test]
    fn test_touch_slides_window() {
        let start = Utc::now();
        let mut s = session(start);
        let p = policy(true, None);

        s.touch(start + Duration::minutes(20), &p);
        assert!(!s.is_expired(start + Duration::minutes(45), &p));
        assert!(s.is_expired(start + Duration::minutes(50), &p));
    }

    #[test]
    fn test_touch_without_sliding_keeps_deadline() {
        let start = Utc::now();
        let mut s = session(start);
        let p = policy(false, None);

        s.touch(start + Duration::minutes(20), &p);
        assert_eq!(s.last_access_at, start);
        assert!(s.is_expired(start + Duration::minutes(30), &p));
    }

    #[test]
    fn test_max_lifetime_caps_sliding() {
        let start = Utc::now();
        let mut s = session(start);
        let p = policy(true, Some(Duration::hours(1)));

        for minutes in [20, 40, 55] {
            s.touch(start + Duration::minutes(minutes), &p);
        }
        assert_eq!(s.expires_at(&p), start + Duration::hours(1));
        assert!(s.is_expired(start + Duration::minutes(61), &p));
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let start = Utc::now();
        let mut s = session(start);
        let p = policy(true, None);

        s.touch(start - Duration::minutes(5), &p);
        assert_eq!(s.last_access_at, start);
    }

    #[test]
    fn test_huge_timeouts_never_expire() {
        let start = Utc::now();
        let s = session(start);
        let p = SessionPolicy {
            idle_timeout: Duration::MAX,
            max_lifetime: Some(Duration::seconds(10_000_000_000_000)),
            sliding: true,
        };

        assert_eq!(s.expires_at(&p), DateTime::<Utc>::MAX_UTC);
        assert!(!s.is_expired(start + Duration::days(365 * 100), &p));
    }
}
