//! Content Backend Module
//!
//! Posts are public; comments and favorites require a session resolved
//! through `auth::SessionRegistry`.
//!
//! - `domain/` - Posts, comments, favorites and their store contracts
//! - `application/` - Use cases and configuration
//! - `infra/` - Postgres and in-memory stores
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use infra::memory::MemoryContentRepository;
pub use infra::postgres::PgContentRepository;
pub use presentation::{ContentAppState, content_router};
