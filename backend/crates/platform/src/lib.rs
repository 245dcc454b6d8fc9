//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Credential hashing (Argon2id) and password policy
//! - Cryptographic utilities (random tokens, SHA-256, base64url)
//! - Cookie handling for the session boundary
//! - Notification gateway contract and fire-and-forget dispatch

pub mod cookie;
pub mod crypto;
pub mod notify;
pub mod password;
