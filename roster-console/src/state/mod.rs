//! Shell state owned by the event loop
//!
//! Each piece of state has a single owner and is mutated only by its
//! handlers; spawned tasks report back through the event channel.

pub mod auth;
pub mod directory;

pub use auth::{AuthGate, AuthState};
pub use directory::{
    DirectoryState, FilterSpec, PageSpec, SortField, SortSpec, ViewMode, VisiblePage, visible_page,
};
