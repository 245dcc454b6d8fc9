//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router. Session lookup relies on the auth
//! crate's `capture_session_token` middleware.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ContentAppState;
pub use router::content_router;
