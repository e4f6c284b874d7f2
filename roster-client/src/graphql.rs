//! GraphQL wire format
//!
//! Hand-built operation payloads and typed response envelopes for the
//! directory service. Each operation is a `{operationName, variables,
//! query}` POST body; responses come back as `{data}` or `{errors}`.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ClientError, ClientResult};

pub const EMPLOYEES_QUERY: &str = r#"
    query GetEmployees($filter: EmployeeFilterInput) {
        employees(filter: $filter) {
            id
            name
            age
            class
            subjects
            attendance
            createdAt
            updatedAt
        }
    }
"#;

pub const EMPLOYEES_PAGINATED_QUERY: &str = r#"
    query GetEmployeesPaginated($pagination: PaginationInput!, $filter: EmployeeFilterInput) {
        employeesPaginated(pagination: $pagination, filter: $filter) {
            items {
                id
                name
                age
                class
                subjects
                attendance
                createdAt
                updatedAt
            }
            total
            hasMore
            currentPage
            totalPages
        }
    }
"#;

pub const EMPLOYEE_QUERY: &str = r#"
    query GetEmployee($id: Int!) {
        employee(id: $id) {
            id
            name
            age
            class
            subjects
            attendance
            createdAt
            updatedAt
        }
    }
"#;

pub const ADD_EMPLOYEE_MUTATION: &str = r#"
    mutation AddEmployee($input: CreateEmployeeInput!) {
        addEmployee(input: $input) {
            id
            name
            age
            class
            subjects
            attendance
            createdAt
            updatedAt
        }
    }
"#;

pub const UPDATE_EMPLOYEE_MUTATION: &str = r#"
    mutation UpdateEmployee($id: Int!, $input: UpdateEmployeeInput!) {
        updateEmployee(id: $id, input: $input) {
            id
            name
            age
            class
            subjects
            attendance
            createdAt
            updatedAt
        }
    }
"#;

pub const DELETE_EMPLOYEE_MUTATION: &str = r#"
    mutation DeleteEmployee($id: Int!) {
        deleteEmployee(id: $id) {
            id
            name
        }
    }
"#;

pub const LOGIN_MUTATION: &str = r#"
    mutation Login($input: LoginInput!) {
        login(input: $input) {
            accessToken
            user {
                id
                username
                role
            }
        }
    }
"#;

/// Build the POST body for one operation
pub fn build_payload(operation_name: &str, query: &str, variables: Value) -> Value {
    json!({
        "operationName": operation_name,
        "variables": variables,
        "query": query,
    })
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// One entry of the response `errors` array
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap `data`, surfacing the server's first error message
    pub fn into_data(self) -> ClientResult<T> {
        if let Some(err) = self.errors.first() {
            return Err(ClientError::Api(err.message.clone()));
        }
        self.data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }
}
