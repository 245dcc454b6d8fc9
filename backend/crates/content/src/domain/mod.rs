//! Domain Layer
//!
//! Posts, comments and favorites, plus the store contracts.

pub mod entity;
pub mod repository;
pub mod value_object;
