//! Shared Kernel
//!
//! Vocabulary every service crate agrees on:
//! - Unified error type ([`error::app_error::AppError`]) and its classification
//! - [`error::persistence::PersistenceError`], the failure contract of every store
//! - Typed identifiers
//! - Deadline helper for collaborator calls
//!
//! Only things whose meaning is identical across `auth` and `content` live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
    pub mod persistence;
}
pub mod deadline;
pub mod id;

pub use deadline::bounded;
pub use error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
    persistence::{PersistenceError, PersistenceResult},
};
