//! Data source port

use async_trait::async_trait;
use shared::Employee;

use crate::error::ClientResult;

/// A backend able to produce the full employee collection
///
/// Both the demo adapter and the GraphQL directory implement this; the
/// front-end picks one at startup and never retries on its behalf.
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    async fn fetch_all(&self) -> ClientResult<Vec<Employee>>;
}
