//! Entities

pub mod principal;
pub mod session;
pub mod user;

pub use principal::{Caller, Principal};
pub use session::{Session, SessionPolicy};
pub use user::User;
