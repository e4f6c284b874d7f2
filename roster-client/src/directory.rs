//! GraphQL directory API
//!
//! One method per operation the directory service exposes. Queries run
//! anonymously; mutations expect a bearer token, set after login.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::{
    Employee, EmployeeCreate, EmployeeFilter, EmployeePage, EmployeeUpdate, LoginResponse,
    PageRequest,
};
use validator::Validate;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::graphql::{
    ADD_EMPLOYEE_MUTATION, DELETE_EMPLOYEE_MUTATION, EMPLOYEE_QUERY, EMPLOYEES_PAGINATED_QUERY,
    EMPLOYEES_QUERY, GraphQlResponse, LOGIN_MUTATION, UPDATE_EMPLOYEE_MUTATION, build_payload,
};
use crate::http::HttpClient;
use crate::source::EmployeeSource;

/// Reduced record echoed back by the delete mutation
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedEmployee {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct EmployeesData {
    employees: Vec<Employee>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeesPaginatedData {
    employees_paginated: EmployeePage,
}

#[derive(Debug, Deserialize)]
struct EmployeeData {
    employee: Option<Employee>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddEmployeeData {
    add_employee: Employee,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateEmployeeData {
    update_employee: Employee,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteEmployeeData {
    delete_employee: DeletedEmployee,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    login: LoginResponse,
}

/// Client for the employee directory GraphQL service
#[derive(Debug, Clone)]
pub struct DirectoryApi {
    http: HttpClient,
}

impl DirectoryApi {
    /// Create a new directory client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut http = HttpClient::new(&config.api_url, config.timeout)?;
        http.set_token(config.token.clone());
        Ok(Self { http })
    }

    /// Replace or clear the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.http.set_token(token);
    }

    /// Get the current bearer token
    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    /// Execute one operation and unwrap its data
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> ClientResult<T> {
        let payload = build_payload(operation, query, variables);
        let response: GraphQlResponse<T> = self.http.post("", &payload).await?;
        response.into_data()
    }

    // ========== Queries ==========

    /// Fetch the full employee collection
    pub async fn employees(&self, filter: Option<&EmployeeFilter>) -> ClientResult<Vec<Employee>> {
        let filter = filter.and_then(EmployeeFilter::normalized);
        let data: EmployeesData = self
            .execute("GetEmployees", EMPLOYEES_QUERY, json!({"filter": filter}))
            .await?;
        tracing::debug!(count = data.employees.len(), "Fetched employees");
        Ok(data.employees)
    }

    /// Fetch one server-side page
    pub async fn employees_paginated(
        &self,
        page: &PageRequest,
        filter: Option<&EmployeeFilter>,
    ) -> ClientResult<EmployeePage> {
        let filter = filter.and_then(EmployeeFilter::normalized);
        let data: EmployeesPaginatedData = self
            .execute(
                "GetEmployeesPaginated",
                EMPLOYEES_PAGINATED_QUERY,
                json!({"pagination": page, "filter": filter}),
            )
            .await?;
        Ok(data.employees_paginated)
    }

    /// Fetch a single employee by id
    pub async fn employee(&self, id: i64) -> ClientResult<Employee> {
        let data: EmployeeData = self
            .execute("GetEmployee", EMPLOYEE_QUERY, json!({"id": id}))
            .await?;
        data.employee
            .ok_or_else(|| ClientError::NotFound(format!("Employee {}", id)))
    }

    // ========== Mutations ==========

    /// Create an employee record
    pub async fn add_employee(&self, input: &EmployeeCreate) -> ClientResult<Employee> {
        input.validate()?;
        let data: AddEmployeeData = self
            .execute(
                "AddEmployee",
                ADD_EMPLOYEE_MUTATION,
                json!({"input": input}),
            )
            .await?;
        tracing::info!(id = data.add_employee.id, "Employee created");
        Ok(data.add_employee)
    }

    /// Apply a partial update to an employee record
    pub async fn update_employee(
        &self,
        id: i64,
        input: &EmployeeUpdate,
    ) -> ClientResult<Employee> {
        input.validate()?;
        let data: UpdateEmployeeData = self
            .execute(
                "UpdateEmployee",
                UPDATE_EMPLOYEE_MUTATION,
                json!({"id": id, "input": input}),
            )
            .await?;
        tracing::info!(id, "Employee updated");
        Ok(data.update_employee)
    }

    /// Delete an employee record
    pub async fn delete_employee(&self, id: i64) -> ClientResult<DeletedEmployee> {
        let data: DeleteEmployeeData = self
            .execute(
                "DeleteEmployee",
                DELETE_EMPLOYEE_MUTATION,
                json!({"id": id}),
            )
            .await?;
        tracing::info!(id, name = %data.delete_employee.name, "Employee deleted");
        Ok(data.delete_employee)
    }

    // ========== Auth ==========

    /// Exchange credentials for a token and user descriptor
    ///
    /// The token is not attached automatically; the caller decides when the
    /// session becomes active via [`DirectoryApi::set_token`].
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let data: LoginData = self
            .execute(
                "Login",
                LOGIN_MUTATION,
                json!({"input": {"username": username, "password": password}}),
            )
            .await?;
        tracing::info!(username = %data.login.user.username, "Logged in");
        Ok(data.login)
    }
}

#[async_trait]
impl EmployeeSource for DirectoryApi {
    async fn fetch_all(&self) -> ClientResult<Vec<Employee>> {
        self.employees(None).await
    }
}
