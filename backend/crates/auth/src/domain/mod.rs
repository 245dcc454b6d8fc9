//! Domain Layer
//!
//! Entities, value objects, repository traits and the authorization rule.

pub mod authorize;
pub mod entity;
pub mod repository;
pub mod value_object;
