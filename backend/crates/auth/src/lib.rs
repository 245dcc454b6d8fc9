//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, authorization rule
//! - `application/` - Use cases and configuration
//! - `infra/` - User stores (Postgres, in-memory) and the session registry
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration with username, email and confirmed password
//! - Login / logout over an opaque session cookie
//! - Self-service password reset and account overview
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; unknown-user logins cost the same as bad passwords
//! - Sessions live in an in-process registry keyed by the token's SHA-256
//! - Idle timeout with sliding renewal, capped by an absolute lifetime
//! - A caller may only act on their own account (`domain::authorize`)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::{Caller, Principal};
pub use error::{AuthError, AuthResult};
pub use infra::memory::MemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use infra::session_registry::{SessionRegistry, SessionView};
pub use presentation::{AuthAppState, PresentedToken, auth_router, capture_session_token};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
