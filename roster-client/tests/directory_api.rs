// Adapter integration against an in-process mock of the directory service.

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use roster_client::{ClientConfig, ClientError, DemoSource, DirectoryApi, EmployeeSource};
use shared::{EmployeeCreate, EmployeeFilter, EmployeeUpdate, PageRequest, Role, SortOrder};

fn employee_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "age": 25,
        "class": "Class A",
        "subjects": ["Mathematics", "Physics"],
        "attendance": {"2024-01-01": true, "2024-01-02": false},
        "createdAt": "2024-01-01T09:00:00Z",
        "updatedAt": "2024-01-01T21:00:00Z"
    })
}

// ids deliberately out of name order so sorted responses are visible
fn collection() -> Vec<(i64, &'static str)> {
    vec![(1, "Charlie"), (2, "Alice"), (3, "Bob")]
}

async fn graphql_handler(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let op = body["operationName"].as_str().unwrap_or_default();
    match op {
        "GetEmployees" => {
            let employees: Vec<Value> = collection()
                .into_iter()
                .map(|(id, name)| employee_json(id, name))
                .collect();
            Json(json!({"data": {"employees": employees}}))
        }
        "GetEmployeesPaginated" => {
            let limit = body["variables"]["pagination"]["limit"].as_u64().unwrap_or(10) as usize;
            let offset = body["variables"]["pagination"]["offset"].as_u64().unwrap_or(0) as usize;

            let mut records = collection();
            if body["variables"]["pagination"]["sortBy"] == "name" {
                records.sort_by_key(|(_, name)| *name);
                if body["variables"]["pagination"]["sortOrder"] == "DESC" {
                    records.reverse();
                }
            }

            let total = records.len();
            let items: Vec<Value> = records
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(|(id, name)| employee_json(id, name))
                .collect();

            Json(json!({"data": {"employeesPaginated": {
                "items": items,
                "total": total,
                "hasMore": offset + limit < total,
                "currentPage": offset / limit + 1,
                "totalPages": total.div_ceil(limit),
            }}}))
        }
        "GetEmployee" => {
            let id = body["variables"]["id"].as_i64().unwrap_or(0);
            match collection().into_iter().find(|(rid, _)| *rid == id) {
                Some((id, name)) => Json(json!({"data": {"employee": employee_json(id, name)}})),
                None => Json(json!({"data": {"employee": null}})),
            }
        }
        "AddEmployee" => {
            if headers.get("authorization").is_none() {
                return Json(json!({"errors": [{"message": "Authentication required"}]}));
            }
            let name = body["variables"]["input"]["name"].as_str().unwrap_or_default();
            Json(json!({"data": {"addEmployee": employee_json(99, name)}}))
        }
        "UpdateEmployee" => {
            let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
            if bearer != Some("Bearer jwt-admin") {
                return Json(json!({"errors": [{"message": "Authentication required"}]}));
            }
            let id = body["variables"]["id"].as_i64().unwrap_or(0);
            let Some((id, name)) = collection().into_iter().find(|(rid, _)| *rid == id) else {
                return Json(json!({"errors": [{"message": "Employee not found"}]}));
            };
            // merge the partial input over the stored record
            let mut record = employee_json(id, name);
            if let Some(input) = body["variables"]["input"].as_object() {
                for (field, value) in input {
                    record[field] = value.clone();
                }
            }
            Json(json!({"data": {"updateEmployee": record}}))
        }
        "DeleteEmployee" => {
            let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
            if bearer != Some("Bearer jwt-admin") {
                return Json(json!({"errors": [{"message": "Authentication required"}]}));
            }
            let id = body["variables"]["id"].as_i64().unwrap_or(0);
            Json(json!({"data": {"deleteEmployee": {"id": id, "name": "Charlie"}}}))
        }
        "Login" => {
            let username = body["variables"]["input"]["username"].as_str().unwrap_or_default();
            let password = body["variables"]["input"]["password"].as_str().unwrap_or_default();
            if username == "admin" && password == "admin123" {
                Json(json!({"data": {"login": {
                    "accessToken": "jwt-admin",
                    "user": {"id": "1", "username": "admin", "role": "ADMIN"}
                }}}))
            } else {
                Json(json!({"errors": [{"message": "Invalid credentials"}]}))
            }
        }
        other => Json(json!({"errors": [{"message": format!("Unknown operation: {other}")}]})),
    }
}

async fn users_handler() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz"},
        {"id": 2, "name": "Ervin Howell", "username": "Antonette", "phone": "010-692-6593"},
    ]))
}

async fn spawn_mock() -> String {
    let app = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/users", get(users_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn mock_config() -> ClientConfig {
    let base = spawn_mock().await;
    ClientConfig::new(format!("{}/graphql", base), format!("{}/users", base))
}

#[tokio::test]
async fn employees_query_returns_collection() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    let employees = api.employees(None).await.unwrap();
    assert_eq!(employees.len(), 3);
    assert_eq!(employees[0].name, "Charlie");
    assert_eq!(employees[0].age, 25);
    assert_eq!(employees[0].attendance.len(), 2);
}

#[tokio::test]
async fn paginated_query_round_trips_page_shape() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    let page = PageRequest::new(2, 0).sorted("name", SortOrder::Asc);
    let result = api.employees_paginated(&page, None).await.unwrap();

    assert_eq!(result.total, 3);
    assert!(result.has_more);
    assert_eq!(result.current_page, 1);
    assert_eq!(result.total_pages, 2);
    let names: Vec<&str> = result.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    let page = PageRequest::new(2, 2).sorted("name", SortOrder::Asc);
    let result = api.employees_paginated(&page, None).await.unwrap();
    assert!(!result.has_more);
    let names: Vec<&str> = result.items.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Charlie"]);
}

#[tokio::test]
async fn employee_by_id_maps_null_to_not_found() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    let found = api.employee(2).await.unwrap();
    assert_eq!(found.name, "Alice");

    match api.employee(42).await {
        Err(ClientError::NotFound(msg)) => assert!(msg.contains("42")),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn login_attaches_bearer_for_mutations() {
    let mut api = DirectoryApi::new(&mock_config().await).unwrap();

    // Mutations are rejected until the token is set
    match api.delete_employee(1).await {
        Err(ClientError::Api(msg)) => assert_eq!(msg, "Authentication required"),
        other => panic!("expected Api error, got {:?}", other),
    }

    let login = api.login("admin", "admin123").await.unwrap();
    assert_eq!(login.access_token, "jwt-admin");
    assert_eq!(login.user.role, Role::Admin);

    api.set_token(Some(login.access_token));
    let deleted = api.delete_employee(1).await.unwrap();
    assert_eq!(deleted.id, 1);
    assert_eq!(deleted.name, "Charlie");
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    match api.login("admin", "wrong").await {
        Err(ClientError::Api(msg)) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn add_employee_validates_before_sending() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    let input = EmployeeCreate {
        name: String::new(),
        age: 30,
        class: "Class A".to_string(),
        subjects: vec![],
    };
    assert!(matches!(
        api.add_employee(&input).await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn add_employee_round_trips_when_authorized() {
    let mut api = DirectoryApi::new(&mock_config().await).unwrap();
    api.set_token(Some("jwt-admin".to_string()));

    let input = EmployeeCreate {
        name: "Dana".to_string(),
        age: 30,
        class: "Class C".to_string(),
        subjects: vec!["History".to_string()],
    };
    let created = api.add_employee(&input).await.unwrap();
    assert_eq!(created.id, 99);
    assert_eq!(created.name, "Dana");
}

#[tokio::test]
async fn update_employee_validates_before_sending() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    let input = EmployeeUpdate {
        age: Some(150),
        ..Default::default()
    };
    assert!(matches!(
        api.update_employee(2, &input).await,
        Err(ClientError::Validation(_))
    ));
}

#[tokio::test]
async fn update_employee_round_trips_when_authorized() {
    let config = mock_config().await;
    let input = EmployeeUpdate {
        name: Some("Alicia".to_string()),
        age: Some(26),
        ..Default::default()
    };

    // gated like the other mutations
    let anonymous = DirectoryApi::new(&config).unwrap();
    match anonymous.update_employee(2, &input).await {
        Err(ClientError::Api(msg)) => assert_eq!(msg, "Authentication required"),
        other => panic!("expected Api error, got {:?}", other),
    }

    // a token carried by the config is attached from the first request
    let api = DirectoryApi::new(&config.with_token("jwt-admin")).unwrap();
    let updated = api.update_employee(2, &input).await.unwrap();
    assert_eq!(updated.id, 2);
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.age, 26);
    // fields absent from the input keep their stored values
    assert_eq!(updated.class, "Class A");
    assert_eq!(updated.subjects.len(), 2);
}

#[tokio::test]
async fn filter_is_normalized_before_sending() {
    let api = DirectoryApi::new(&mock_config().await).unwrap();

    // Blank criteria serialize as an absent filter; the request still succeeds
    let filter = EmployeeFilter {
        name: Some("   ".to_string()),
        class: None,
    };
    let employees = api.employees(Some(&filter)).await.unwrap();
    assert_eq!(employees.len(), 3);
}

#[tokio::test]
async fn demo_source_derives_directory_fields() {
    let source = DemoSource::new(&mock_config().await).unwrap();

    let employees = source.fetch_all().await.unwrap();
    assert_eq!(employees.len(), 2);

    assert_eq!(employees[0].id, 1);
    assert_eq!(employees[0].name, "Leanne Graham");
    assert_eq!(employees[0].age, 23);
    assert_eq!(employees[0].class, "Class B");

    assert_eq!(employees[1].id, 2);
    assert_eq!(employees[1].age, 24);
    assert_eq!(employees[1].class, "Class C");
    assert_eq!(employees[1].subjects.len(), 4);
}
