//! Demo data source
//!
//! Fetches a public users endpoint and derives the directory fields from
//! each record's id. The mapping is pure: the same id always yields the
//! same age, class, subjects and attendance, so the demo directory is
//! stable across reloads without any server-side state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::Deserialize;
use shared::Employee;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::source::EmployeeSource;

/// Wire shape of the demo users endpoint
///
/// Only id and name survive into the directory; the contact fields are
/// accepted so any user-shaped payload parses.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoUser {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

const SUBJECT_CATALOGUE: [&str; 8] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "English",
    "Computer Science",
];

const CLASS_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

// 2024-01-01T09:00:00Z, the reference instant all derived timestamps
// are offset from
const DERIVATION_EPOCH_SECS: i64 = 1_704_099_600;

fn derivation_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(DERIVATION_EPOCH_SECS)
}

/// Derive the directory fields for one demo user
pub fn derive_employee(user: &DemoUser) -> Employee {
    let id = user.id;

    let age = 22 + id.rem_euclid(24) as u8;
    let class = format!("Class {}", CLASS_LETTERS[id.rem_euclid(6) as usize]);

    let subject_count = 2 + id.rem_euclid(3) as usize;
    let start = id.rem_euclid(8) as usize;
    let subjects = (0..subject_count)
        .map(|k| SUBJECT_CATALOGUE[(start + k) % SUBJECT_CATALOGUE.len()].to_string())
        .collect();

    // Five weekdays starting at the reference date offset by the id
    let mut attendance = BTreeMap::new();
    let mut day = derivation_epoch().date_naive() + Duration::days(id);
    let mut day_index: i64 = 0;
    while day_index < 5 {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            let present = (id + day_index) % 4 != 0;
            attendance.insert(day.format("%Y-%m-%d").to_string(), present);
            day_index += 1;
        }
        day += Duration::days(1);
    }

    let created_at = derivation_epoch() + Duration::days(id);
    let updated_at = created_at + Duration::hours(12);

    Employee {
        id,
        name: user.name.clone(),
        age,
        class,
        subjects,
        attendance,
        created_at,
        updated_at,
    }
}

/// Demo employee source
#[derive(Debug, Clone)]
pub struct DemoSource {
    http: HttpClient,
}

impl DemoSource {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(&config.demo_url, config.timeout)?,
        })
    }
}

#[async_trait]
impl EmployeeSource for DemoSource {
    async fn fetch_all(&self) -> ClientResult<Vec<Employee>> {
        let users: Vec<DemoUser> = self.http.get("").await?;
        tracing::debug!(count = users.len(), "Fetched demo users");
        Ok(users.iter().map(derive_employee).collect())
    }
}
