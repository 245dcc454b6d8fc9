//! Session Token
//!
//! The opaque credential handed to the client. Only its SHA-256 digest is
//! kept server-side.

use std::fmt;

use platform::crypto::{random_token, sha256};

/// Entropy per token
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Digest used as the registry key
pub type TokenDigest = [u8; 32];

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh random token
    pub fn generate() -> Self {
        Self(random_token(SESSION_TOKEN_BYTES))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn digest(&self) -> TokenDigest {
        digest_of(&self.0)
    }
}

/// Digest of a presented (possibly forged) token string
pub fn digest_of(token: &str) -> TokenDigest {
    sha256(token.as_bytes())
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}
