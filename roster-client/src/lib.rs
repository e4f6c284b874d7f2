//! Roster Client - data access for the employee directory
//!
//! Provides the demo REST adapter, the GraphQL directory API and the
//! durable local store used for the flag set and the cached session.

pub mod config;
pub mod demo;
pub mod directory;
pub mod error;
pub mod graphql;
pub mod http;
pub mod source;
pub mod store;

pub use config::{ClientConfig, SourceKind};
pub use demo::DemoSource;
pub use directory::{DeletedEmployee, DirectoryApi};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use source::EmployeeSource;
pub use store::{FlagStore, LocalStore, SessionStore, StoreError, StoreResult, StoredSession};
