//! Credential Hashing and Verification
//!
//! One-way password handling:
//! - Argon2id hashing in PHC string format (algorithm, cost and salt travel with the digest)
//! - Work factor fixed per process via [`HashCost`]
//! - Optional application-wide pepper
//! - Zeroization of clear text and peppered buffers
//! - Verification never errors: a malformed digest is simply a mismatch
//!
//! Clear text never leaves this module in any form other than a digest.

use std::fmt;
use std::sync::OnceLock;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Upper bound accepted by every policy. Keeps hashing cost bounded.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Input used to burn one verification when no digest exists for a login.
const DUMMY_PASSWORD: &[u8] = b"timing-equalizer";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Hashing failures. Verification has no error path.
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Policy
// ============================================================================

/// Rules a clear-text password must satisfy before it is hashed.
///
/// The default is permissive (any non-blank password up to
/// [`MAX_PASSWORD_LENGTH`]); [`PasswordPolicy::strict`] follows NIST SP 800-63B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub reject_common_patterns: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: MAX_PASSWORD_LENGTH,
            reject_common_patterns: false,
        }
    }
}

impl PasswordPolicy {
    /// NIST SP 800-63B: at least 8 characters, no well-known patterns.
    pub fn strict() -> Self {
        Self {
            min_length: 8,
            max_length: MAX_PASSWORD_LENGTH,
            reject_common_patterns: true,
        }
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop.
///
/// Not `Clone`; `Debug` is redacted.
///
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordPolicy};
///
/// let password = ClearTextPassword::new("secret".to_string(), &PasswordPolicy::default()).unwrap();
/// assert!(format!("{:?}", password).contains("REDACTED"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and validate against `policy`.
    pub fn new(raw: String, policy: &PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        let candidate = Self(normalized);

        if candidate.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Length in code points, not bytes
        let char_count = candidate.0.chars().count();
        if char_count < policy.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: policy.min_length,
                actual: char_count,
            });
        }
        let max = policy.max_length.min(MAX_PASSWORD_LENGTH);
        if char_count > max {
            return Err(PasswordPolicyError::TooLong {
                max,
                actual: char_count,
            });
        }

        if candidate
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if policy.reject_common_patterns && is_common_pattern(&candidate.0) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(candidate)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Constant-time equality, used for password/confirmation checks.
    pub fn matches(&self, other: &ClearTextPassword) -> bool {
        crate::crypto::constant_time_eq(self.as_bytes(), other.as_bytes())
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Digest in PHC string format. Safe to persist.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a digest read back from storage. Not validated here:
    /// a corrupted value only ever fails verification.
    pub fn from_stored(s: impl Into<String>) -> Self {
        Self { hash: s.into() }
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory in KiB
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashCost {
    /// Minimal cost for tests and local development only.
    pub fn fast() -> Self {
        Self {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Salted one-way hashing with a fixed work factor.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    pepper: Option<Zeroizing<Vec<u8>>>,
    dummy: OnceLock<Option<HashedPassword>>,
}

impl CredentialHasher {
    pub fn new(cost: HashCost, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidCost(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            pepper: pepper.map(Zeroizing::new),
            dummy: OnceLock::new(),
        })
    }

    /// Hash with a fresh 128-bit salt.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        self.hash_bytes(&self.peppered(password.as_bytes()))
    }

    /// Check `password` against `digest`.
    ///
    /// Argon2 compares in constant time. Any parse failure is `false`.
    pub fn verify(&self, password: &ClearTextPassword, digest: &HashedPassword) -> bool {
        self.verify_bytes(&self.peppered(password.as_bytes()), digest)
    }

    /// Spend one verification's worth of work and return `false`.
    ///
    /// Called when a login names an unknown account, so that path costs the
    /// same as a wrong password.
    pub fn verify_absent(&self, password: &ClearTextPassword) -> bool {
        let dummy = self.dummy.get_or_init(|| {
            self.hash_bytes(&self.peppered(DUMMY_PASSWORD)).ok()
        });
        if let Some(dummy) = dummy {
            let _ = self.verify(password, dummy);
        }
        false
    }

    fn peppered(&self, password: &[u8]) -> Zeroizing<Vec<u8>> {
        let mut combined = Zeroizing::new(password.to_vec());
        if let Some(pepper) = &self.pepper {
            combined.extend_from_slice(pepper);
        }
        combined
    }

    fn hash_bytes(&self, bytes: &[u8]) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = self
            .argon2
            .hash_password(bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    fn verify_bytes(&self, bytes: &[u8], digest: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&digest.hash) else {
            return false;
        };
        // Cost parameters are read from the digest itself
        self.argon2.verify_password(bytes, &parsed).is_ok()
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("params", self.argon2.params())
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    // All one character ("aaaaaaaa")
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if lower.chars().count() >= 3 && chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein",
        "welcome",
        "admin123",
        "iloveyou",
        "sunshine",
        "football",
        "baseball",
        "trustno1",
    ];
    COMMON_PASSWORDS.contains(&lower.as_str())
}

fn is_sequential_numbers(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 4 || digits.len() != s.chars().count() {
        return false;
    }

    let ascending = digits
        .windows(2)
        .all(|w| w[1] == w[0] + 1 || (w[0] == 9 && w[1] == 0));
    let descending = digits
        .windows(2)
        .all(|w| w[0] == w[1] + 1 || (w[0] == 0 && w[1] == 9));

    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================
