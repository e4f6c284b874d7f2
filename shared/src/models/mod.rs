//! Data models
//!
//! Shared between the directory API adapters and the console. Wire
//! representation is the GraphQL schema's camelCase; record IDs are `i64`.

pub mod employee;
pub mod user;

// Re-exports
pub use employee::*;
pub use user::*;
