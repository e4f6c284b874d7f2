//! Employee Model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee record as served by the directory API
///
/// `id` is stable and is the sole key used for selection, flagging and
/// row actions. `attendance` maps ISO dates to present/absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub age: u8,
    pub class: String,
    pub subjects: Vec<String>,
    #[serde(default)]
    pub attendance: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Fraction of recorded days the employee was present, if any.
    pub fn attendance_rate(&self) -> Option<f64> {
        if self.attendance.is_empty() {
            return None;
        }
        let present = self.attendance.values().filter(|p| **p).count();
        Some(present as f64 / self.attendance.len() as f64)
    }
}

/// Create employee payload (`CreateEmployeeInput`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 16, max = 100))]
    pub age: u8,
    #[validate(length(min = 1, message = "class must not be empty"))]
    pub class: String,
    pub subjects: Vec<String>,
}

/// Update employee payload (`UpdateEmployeeInput`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(range(min = 16, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[validate(length(min = 1, message = "class must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_wire_shape_is_camel_case() {
        let json = r#"{
            "id": 7,
            "name": "Ada",
            "age": 30,
            "class": "Class B",
            "subjects": ["Logistics"],
            "attendance": {"2024-01-01": true, "2024-01-02": false},
            "createdAt": "2024-01-01T09:00:00Z",
            "updatedAt": "2024-01-01T21:00:00Z"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, 7);
        assert_eq!(employee.attendance.len(), 2);
        assert_eq!(employee.attendance_rate(), Some(0.5));

        let back = serde_json::to_value(&employee).unwrap();
        assert!(back.get("createdAt").is_some());
        assert!(back.get("created_at").is_none());
    }

    #[test]
    fn attendance_rate_empty_is_none() {
        let json = r#"{
            "id": 1,
            "name": "Bo",
            "age": 25,
            "class": "Class A",
            "subjects": [],
            "createdAt": "2024-01-01T09:00:00Z",
            "updatedAt": "2024-01-01T09:00:00Z"
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.attendance_rate(), None);
    }

    #[test]
    fn create_payload_rejects_empty_name() {
        let payload = EmployeeCreate {
            name: String::new(),
            age: 30,
            class: "Class A".into(),
            subjects: vec![],
        };
        assert!(payload.validate().is_err());
    }
}
