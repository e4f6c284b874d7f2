//! Pagination, Sorting and Filter DTOs
//!
//! Wire shapes for the `employeesPaginated` query. The same types drive the
//! in-process list pipeline so local and remote paging agree on semantics.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Sort direction, `ASC` / `DESC` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Asc
    }
}

/// Page slice request
///
/// `offset` counts records, not pages. `sort_by` names a sortable field
/// (`id`, `name`, `age`, `class`); an unknown field leaves the listing in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            sort_by: None,
            sort_order: None,
        }
    }

    pub fn sorted(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }
}

/// Server-side filter criteria; empty strings are treated as absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl EmployeeFilter {
    pub fn is_empty(&self) -> bool {
        fn blank(v: &Option<String>) -> bool {
            v.as_deref().map(str::trim).unwrap_or("").is_empty()
        }
        blank(&self.name) && blank(&self.class)
    }

    /// Drops blank criteria so the serialized filter only carries real values
    pub fn normalized(&self) -> Option<Self> {
        fn keep(v: &Option<String>) -> Option<String> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        }
        let filter = Self {
            name: keep(&self.name),
            class: keep(&self.class),
        };
        if filter.name.is_none() && filter.class.is_none() {
            None
        } else {
            Some(filter)
        }
    }
}

/// One page of the employee listing plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub items: Vec<Employee>,
    pub total: u32,
    pub has_more: bool,
    pub current_page: u32,
    pub total_pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_serializes_camel_case() {
        let req = PageRequest::new(10, 20).sorted("name", SortOrder::Desc);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["limit"], 10);
        assert_eq!(value["offset"], 20);
        assert_eq!(value["sortBy"], "name");
        assert_eq!(value["sortOrder"], "DESC");
    }

    #[test]
    fn absent_sort_fields_are_omitted() {
        let value = serde_json::to_value(PageRequest::new(10, 0)).unwrap();
        assert!(value.get("sortBy").is_none());
        assert!(value.get("sortOrder").is_none());
    }

    #[test]
    fn filter_normalization_drops_blank_criteria() {
        let filter = EmployeeFilter {
            name: Some("  ".into()),
            class: Some(" Class A ".into()),
        };
        let normalized = filter.normalized().unwrap();
        assert_eq!(normalized.name, None);
        assert_eq!(normalized.class.as_deref(), Some("Class A"));

        let blank = EmployeeFilter {
            name: Some(String::new()),
            class: None,
        };
        assert!(blank.is_empty());
        assert!(blank.normalized().is_none());
    }

    #[test]
    fn sort_order_toggles() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
    }
}
