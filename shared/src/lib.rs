//! Shared types for the Roster employee directory
//!
//! Domain models and API payload types used by both the client library
//! and the terminal front-end.

pub mod auth;
pub mod models;
pub mod page;

// Re-exports
pub use auth::{LoginRequest, LoginResponse};
pub use models::{Employee, EmployeeCreate, EmployeeUpdate, Role, UserInfo};
pub use page::{EmployeeFilter, EmployeePage, PageRequest, SortOrder};
