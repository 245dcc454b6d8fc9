//! Infrastructure Layer
//!
//! Store implementations and the in-process session registry.

pub mod memory;
pub mod postgres;
pub mod session_registry;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
pub use session_registry::{SessionRegistry, SessionView};
