//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::{CredentialHasher, HashCost, PasswordHashError, PasswordPolicy};

use crate::domain::entity::SessionPolicy;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Maximum gap between two requests on one session (30 minutes)
    pub session_idle_timeout: Duration,
    /// Absolute session lifetime (12 hours); `None` disables the cap
    pub session_max_lifetime: Option<Duration>,
    /// Whether each resolve pushes the idle deadline forward
    pub sliding_sessions: bool,
    /// How often the background sweeper evicts expired sessions
    pub sweep_interval: Duration,
    /// Argon2id work factor
    pub hash_cost: HashCost,
    pub password_policy: PasswordPolicy,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Deadline for each user store call
    pub store_timeout: Duration,
    /// Deadline for each notification delivery
    pub notify_timeout: Duration,
    /// Public base URL, linked from outbound messages
    pub site_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            session_idle_timeout: Duration::from_secs(30 * 60),
            session_max_lifetime: Some(Duration::from_secs(12 * 3600)),
            sliding_sessions: true,
            sweep_interval: Duration::from_secs(60),
            hash_cost: HashCost::default(),
            password_policy: PasswordPolicy::default(),
            password_pepper: None,
            store_timeout: Duration::from_secs(5),
            notify_timeout: Duration::from_secs(10),
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, cheap hashing)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            hash_cost: HashCost::fast(),
            ..Default::default()
        }
    }

    /// Session expiry rules in domain terms
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            idle_timeout: to_chrono(self.session_idle_timeout),
            max_lifetime: self.session_max_lifetime.map(to_chrono),
            sliding: self.sliding_sessions,
        }
    }

    /// Cookie attributes for the session cookie
    ///
    /// Max-Age follows the longest a session can live, so the browser never
    /// drops a cookie the registry would still honor.
    pub fn session_cookie(&self) -> CookieConfig {
        let max_age = if self.sliding_sessions {
            self.session_max_lifetime
        } else {
            Some(self.session_idle_timeout)
        };

        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: max_age.map(|d| d.as_secs()),
        }
    }

    /// Build the credential hasher for this work factor and pepper
    pub fn credential_hasher(&self) -> Result<CredentialHasher, PasswordHashError> {
        CredentialHasher::new(self.hash_cost, self.password_pepper.clone())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("session_idle_timeout", &self.session_idle_timeout)
            .field("session_max_lifetime", &self.session_max_lifetime)
            .field("sliding_sessions", &self.sliding_sessions)
            .field("hash_cost", &self.hash_cost)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("site_url", &self.site_url)
            .finish_non_exhaustive()
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX)
}
