//! Employee list state machine
//!
//! Owns the in-memory collection plus everything derived from it: sort,
//! filter, paging, the flagged overlay and the selection cursor. The
//! visible page is recomputed from scratch on every input change; at
//! tens of records there is nothing worth memoizing.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use roster_client::{FlagStore, StoreResult};
use shared::{Employee, EmployeeFilter, EmployeePage, PageRequest, SortOrder};

// ========== View State ==========

/// Rendering mode of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Tabular rows
    #[default]
    Grid,
    /// Card tiles
    Tile,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Tile,
            ViewMode::Tile => ViewMode::Grid,
        }
    }
}

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Age,
    Class,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Id,
        SortField::Name,
        SortField::Age,
        SortField::Class,
    ];

    /// Wire name used by the paginated query
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Age => "age",
            SortField::Class => "class",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::Name => "Name",
            SortField::Age => "Age",
            SortField::Class => "Class",
        }
    }

    /// Next column in display order, wrapping around
    pub fn cycled(self) -> Self {
        match self {
            SortField::Id => SortField::Name,
            SortField::Name => SortField::Age,
            SortField::Age => SortField::Class,
            SortField::Class => SortField::Id,
        }
    }
}

/// Sort specification: one field plus a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    /// Compare two records; text fields compare case-insensitively
    fn compare(&self, a: &Employee, b: &Employee) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Age => a.age.cmp(&b.age),
            SortField::Class => a.class.to_lowercase().cmp(&b.class.to_lowercase()),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Free-text filter criteria over name and class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: String,
    pub class: String,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.class.trim().is_empty()
    }

    /// Case-insensitive substring match; blank criteria match everything
    pub fn matches(&self, employee: &Employee) -> bool {
        let name = self.name.trim().to_lowercase();
        if !name.is_empty() && !employee.name.to_lowercase().contains(&name) {
            return false;
        }
        let class = self.class.trim().to_lowercase();
        if !class.is_empty() && !employee.class.to_lowercase().contains(&class) {
            return false;
        }
        true
    }

    /// Wire-shaped filter for the paginated query
    pub fn to_request(&self) -> Option<EmployeeFilter> {
        EmployeeFilter {
            name: Some(self.name.clone()),
            class: Some(self.class.clone()),
        }
        .normalized()
    }
}

/// Page boundary over the sorted and filtered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub offset: usize,
    pub page_size: usize,
}

/// One derived page plus paging totals
#[derive(Debug, Clone, PartialEq)]
pub struct VisiblePage {
    pub items: Vec<Employee>,
    pub total: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

impl VisiblePage {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            current_page: 1,
            total_pages: 0,
            has_more: false,
        }
    }
}

/// Derive one page of the collection under sort, filter and paging
///
/// Pure function of its inputs. The sort is stable, so records that
/// compare equal keep the collection's insertion order in both
/// directions.
pub fn visible_page(
    collection: &[Employee],
    sort: SortSpec,
    filter: &FilterSpec,
    page: PageSpec,
) -> VisiblePage {
    let mut rows: Vec<&Employee> = collection
        .iter()
        .filter(|employee| filter.matches(employee))
        .collect();
    rows.sort_by(|a, b| sort.compare(a, b));

    let total = rows.len();
    let page_size = page.page_size.max(1);
    let start = page.offset.min(total);
    let end = (page.offset + page_size).min(total);

    VisiblePage {
        items: rows[start..end].iter().map(|e| (*e).clone()).collect(),
        total,
        current_page: page.offset / page_size + 1,
        total_pages: total.div_ceil(page_size),
        has_more: end < total,
    }
}

// ========== State Machine ==========

/// List state owned by the event loop
///
/// In demo mode the whole collection lives in memory and pages are
/// derived locally; in server-paged mode the backend slices pages and
/// [`DirectoryState::visible`] returns the last page it delivered.
pub struct DirectoryState {
    collection: Vec<Employee>,
    remote: Option<EmployeePage>,
    server_paged: bool,
    sort: SortSpec,
    filter: FilterSpec,
    offset: usize,
    page_size: usize,
    flags: BTreeSet<i64>,
    flag_store: FlagStore,
    /// Cursor within the visible page
    pub selected: usize,
    loading: bool,
    last_error: Option<String>,
    generation: u64,
}

impl DirectoryState {
    pub fn new(flag_store: FlagStore, page_size: usize, server_paged: bool) -> StoreResult<Self> {
        let flags = flag_store.load()?;
        Ok(Self {
            collection: Vec::new(),
            remote: None,
            server_paged,
            sort: SortSpec::default(),
            filter: FilterSpec::default(),
            offset: 0,
            page_size: page_size.max(1),
            flags,
            flag_store,
            selected: 0,
            loading: false,
            last_error: None,
            generation: 0,
        })
    }

    // ========== Derived Views ==========

    /// The page currently on screen
    pub fn visible(&self) -> VisiblePage {
        if self.server_paged {
            return match &self.remote {
                Some(page) => VisiblePage {
                    items: page.items.clone(),
                    total: page.total as usize,
                    current_page: page.current_page as usize,
                    total_pages: page.total_pages as usize,
                    has_more: page.has_more,
                },
                None => VisiblePage::empty(),
            };
        }
        visible_page(
            &self.collection,
            self.sort,
            &self.filter,
            PageSpec {
                offset: self.offset,
                page_size: self.page_size,
            },
        )
    }

    /// Record under the selection cursor, if any
    pub fn selected_employee(&self) -> Option<Employee> {
        self.visible().items.get(self.selected).cloned()
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Paging input for the server-paged query, mirroring the view state
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page_size as u32, self.offset as u32)
            .sorted(self.sort.field.as_str(), self.sort.order)
    }

    /// Filter input for the server-paged query
    pub fn filter_request(&self) -> Option<EmployeeFilter> {
        self.filter.to_request()
    }

    // ========== Sort / Filter / Paging ==========

    /// Select a sort column; re-selecting the active column flips the
    /// direction. Either way the offset resets to 0.
    pub fn set_sort_field(&mut self, field: SortField) {
        if self.sort.field == field {
            self.sort.order = self.sort.order.toggled();
        } else {
            self.sort = SortSpec {
                field,
                order: SortOrder::Asc,
            };
        }
        self.reset_page();
    }

    /// Flip the sort direction; resets the offset to 0
    pub fn toggle_sort_order(&mut self) {
        self.sort.order = self.sort.order.toggled();
        self.reset_page();
    }

    pub fn set_filter_name(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.filter.name != text {
            self.filter.name = text;
            self.reset_page();
        }
    }

    pub fn set_filter_class(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.filter.class != text {
            self.filter.class = text;
            self.reset_page();
        }
    }

    pub fn clear_filter(&mut self) {
        if !self.filter.is_empty() {
            self.filter = FilterSpec::default();
            self.reset_page();
        }
    }

    /// Advance to the next page when one exists
    pub fn next_page(&mut self) {
        if self.visible().has_more {
            self.offset += self.page_size;
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_size);
        self.selected = 0;
    }

    fn reset_page(&mut self) {
        self.offset = 0;
        self.selected = 0;
    }

    // ========== Selection ==========

    pub fn select_next(&mut self) {
        let len = self.visible().items.len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().items.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    // ========== Flag Overlay ==========

    pub fn is_flagged(&self, id: i64) -> bool {
        self.flags.contains(&id)
    }

    pub fn flags(&self) -> &BTreeSet<i64> {
        &self.flags
    }

    /// Toggle flag membership for one record
    ///
    /// The whole set is written back on every change.
    pub fn toggle_flag(&mut self, id: i64) -> StoreResult<()> {
        if !self.flags.remove(&id) {
            self.flags.insert(id);
        }
        self.flag_store.save(&self.flags)?;
        tracing::debug!(id, flagged = self.flags.contains(&id), "Toggled flag");
        Ok(())
    }

    // ========== Collection Updates ==========

    /// Replace the collection, e.g. after a full fetch
    pub fn set_collection(&mut self, employees: Vec<Employee>) {
        self.collection = employees;
        self.clamp_selection();
    }

    /// Remove a record locally: from the collection and the flag set
    ///
    /// Never calls a remote API; against a demo backend that ignores
    /// writes this is the only delete there is, and it does not
    /// survive a refetch.
    pub fn remove_local(&mut self, id: i64) -> StoreResult<()> {
        self.collection.retain(|employee| employee.id != id);
        if self.flags.remove(&id) {
            self.flag_store.save(&self.flags)?;
        }
        // keep the cursor on a page that still exists
        while self.offset > 0 && self.offset >= self.visible().total {
            self.offset = self.offset.saturating_sub(self.page_size);
        }
        self.clamp_selection();
        tracing::info!(id, "Removed record locally");
        Ok(())
    }

    // ========== Fetch Lifecycle ==========

    /// Mark a fetch as in flight and return its generation token
    ///
    /// A result carrying an older token is discarded on arrival.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.last_error = None;
        self.generation
    }

    /// Apply a full-collection fetch result
    pub fn complete_collection(&mut self, generation: u64, result: Result<Vec<Employee>, String>) {
        if generation != self.generation {
            tracing::debug!(generation, "Discarding stale fetch result");
            return;
        }
        self.loading = false;
        match result {
            Ok(employees) => {
                tracing::info!(count = employees.len(), "Loaded employee collection");
                self.set_collection(employees);
            }
            Err(message) => {
                tracing::error!(%message, "Employee fetch failed");
                self.last_error = Some(message);
            }
        }
    }

    /// Apply a server-paged fetch result
    pub fn complete_remote(&mut self, generation: u64, result: Result<EmployeePage, String>) {
        if generation != self.generation {
            tracing::debug!(generation, "Discarding stale page result");
            return;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                tracing::info!(
                    count = page.items.len(),
                    total = page.total,
                    "Loaded employee page"
                );
                self.remote = Some(page);
                self.clamp_selection();
            }
            Err(message) => {
                tracing::error!(%message, "Employee page fetch failed");
                self.last_error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roster_client::LocalStore;
    use roster_client::store::FLAGGED_EMPLOYEES_KEY;
    use std::collections::BTreeMap;

    fn employee(id: i64, name: &str, age: u8, class: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            age,
            class: class.into(),
            subjects: vec![],
            attendance: BTreeMap::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn state_with(collection: Vec<Employee>, page_size: usize) -> DirectoryState {
        let store = LocalStore::open_in_memory().unwrap();
        let mut state = DirectoryState::new(FlagStore::new(store), page_size, false).unwrap();
        state.set_collection(collection);
        state
    }

    fn ids(page: &VisiblePage) -> Vec<i64> {
        page.items.iter().map(|employee| employee.id).collect()
    }

    fn sample() -> Vec<Employee> {
        vec![
            employee(1, "Charlie", 30, "Class A"),
            employee(2, "alice", 25, "Class C"),
            employee(3, "Bob", 30, "Class B"),
            employee(4, "Dora", 22, "Class A"),
            employee(5, "eve", 25, "Class B"),
            employee(6, "Frank", 41, "Class C"),
            employee(7, "Grace", 22, "Class A"),
        ]
    }

    #[test]
    fn sorting_then_paginating_matches_a_reference_sort() {
        let collection = sample();
        let page_size = 3;
        for field in SortField::ALL {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let sort = SortSpec { field, order };
                let mut reference = collection.clone();
                reference.sort_by(|a, b| sort.compare(a, b));

                for offset in (0..collection.len()).step_by(page_size) {
                    let page = visible_page(
                        &collection,
                        sort,
                        &FilterSpec::default(),
                        PageSpec { offset, page_size },
                    );
                    let expected: Vec<i64> = reference
                        .iter()
                        .skip(offset)
                        .take(page_size)
                        .map(|e| e.id)
                        .collect();
                    assert_eq!(
                        ids(&page),
                        expected,
                        "field {:?} order {:?} offset {}",
                        field,
                        order,
                        offset
                    );
                }
            }
        }
    }

    #[test]
    fn text_sort_ignores_case_and_keeps_tie_insertion_order() {
        let collection = sample();
        let page = visible_page(
            &collection,
            SortSpec {
                field: SortField::Age,
                order: SortOrder::Asc,
            },
            &FilterSpec::default(),
            PageSpec {
                offset: 0,
                page_size: 10,
            },
        );
        // ages 22: Dora(4) before Grace(7); 25: alice(2) before eve(5);
        // 30: Charlie(1) before Bob(3)
        assert_eq!(ids(&page), vec![4, 7, 2, 5, 1, 3, 6]);

        let by_name = visible_page(
            &collection,
            SortSpec {
                field: SortField::Name,
                order: SortOrder::Asc,
            },
            &FilterSpec::default(),
            PageSpec {
                offset: 0,
                page_size: 10,
            },
        );
        // lowercase names interleave with uppercase ones
        assert_eq!(ids(&by_name), vec![2, 3, 1, 4, 5, 6, 7]);
    }

    #[test]
    fn name_ascending_pages_split_as_documented() {
        let collection = vec![
            employee(1, "Charlie", 30, "Class A"),
            employee(2, "Alice", 25, "Class B"),
            employee(3, "Bob", 28, "Class C"),
        ];
        let mut state = state_with(collection, 2);
        state.set_sort_field(SortField::Name);

        let first = state.visible();
        assert_eq!(ids(&first), vec![2, 3]);
        assert_eq!(first.total, 3);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.current_page, 1);
        assert!(first.has_more);

        state.next_page();
        let second = state.visible();
        assert_eq!(ids(&second), vec![1]);
        assert_eq!(second.current_page, 2);
        assert!(!second.has_more);
    }

    #[test]
    fn changing_sort_or_filter_resets_the_offset() {
        let collection: Vec<Employee> = (1..=10)
            .map(|id| employee(id, &format!("Person {id:02}"), 20 + id as u8, "Class A"))
            .collect();
        let mut state = state_with(collection, 3);

        state.next_page();
        assert_eq!(state.offset(), 3);
        state.set_sort_field(SortField::Age);
        assert_eq!(state.offset(), 0);

        state.next_page();
        state.set_filter_name("person");
        assert_eq!(state.offset(), 0);

        state.next_page();
        state.toggle_sort_order();
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn selecting_the_active_sort_field_flips_direction() {
        let mut state = state_with(sample(), 5);
        state.set_sort_field(SortField::Name);
        assert_eq!(state.sort().order, SortOrder::Asc);

        state.set_sort_field(SortField::Name);
        assert_eq!(state.sort().order, SortOrder::Desc);

        state.set_sort_field(SortField::Age);
        assert_eq!(
            state.sort(),
            SortSpec {
                field: SortField::Age,
                order: SortOrder::Asc
            }
        );
    }

    #[test]
    fn filters_match_substrings_case_insensitively() {
        let mut state = state_with(
            vec![
                employee(1, "Charlie", 30, "Class A"),
                employee(2, "Alice", 25, "Class B"),
                employee(3, "Bob", 28, "Class C"),
            ],
            10,
        );
        state.set_filter_name("LI");
        assert_eq!(ids(&state.visible()), vec![1, 2]);

        state.clear_filter();
        state.set_filter_class("b");
        assert_eq!(ids(&state.visible()), vec![2]);
    }

    #[test]
    fn flag_toggle_round_trips_through_the_store() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut state = DirectoryState::new(FlagStore::new(store.clone()), 5, false).unwrap();
        state.set_collection(vec![employee(7, "Ada", 30, "Class A")]);

        state.toggle_flag(7).unwrap();
        assert!(state.is_flagged(7));

        // a fresh state sees the persisted set
        let reloaded = DirectoryState::new(FlagStore::new(store.clone()), 5, false).unwrap();
        assert!(reloaded.is_flagged(7));

        state.toggle_flag(7).unwrap();
        assert!(!state.is_flagged(7));
        assert_eq!(
            store.get(FLAGGED_EMPLOYEES_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn local_delete_drops_the_record_and_its_flag() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut state = DirectoryState::new(FlagStore::new(store.clone()), 5, false).unwrap();
        state.set_collection(vec![
            employee(1, "Ada", 30, "Class A"),
            employee(2, "Bo", 25, "Class B"),
        ]);
        state.toggle_flag(1).unwrap();

        state.remove_local(1).unwrap();
        assert_eq!(ids(&state.visible()), vec![2]);
        assert!(!state.is_flagged(1));
        assert_eq!(
            store.get(FLAGGED_EMPLOYEES_KEY).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn deleting_the_last_record_of_a_page_pulls_the_offset_back() {
        let mut state = state_with(
            vec![
                employee(1, "Ada", 30, "Class A"),
                employee(2, "Bo", 25, "Class B"),
                employee(3, "Cy", 28, "Class C"),
            ],
            2,
        );
        state.next_page();
        assert_eq!(state.offset(), 2);

        state.remove_local(3).unwrap();
        assert_eq!(state.offset(), 0);
        assert_eq!(ids(&state.visible()), vec![1, 2]);
    }

    #[test]
    fn stale_fetch_results_are_discarded() {
        let mut state = state_with(vec![], 5);
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        state.complete_collection(first, Ok(vec![employee(1, "Old", 30, "Class A")]));
        assert!(state.visible().items.is_empty());
        assert!(state.is_loading());

        state.complete_collection(second, Ok(vec![employee(2, "New", 30, "Class A")]));
        assert_eq!(ids(&state.visible()), vec![2]);
        assert!(!state.is_loading());
    }

    #[test]
    fn fetch_errors_keep_prior_data_and_surface_a_message() {
        let mut state = state_with(vec![employee(1, "Ada", 30, "Class A")], 5);
        let generation = state.begin_fetch();
        state.complete_collection(generation, Err("connection refused".into()));

        assert_eq!(ids(&state.visible()), vec![1]);
        assert_eq!(state.last_error(), Some("connection refused"));
        assert!(!state.is_loading());
    }

    #[test]
    fn server_pages_replace_the_visible_page() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut state = DirectoryState::new(FlagStore::new(store), 2, true).unwrap();

        let generation = state.begin_fetch();
        state.complete_remote(
            generation,
            Ok(EmployeePage {
                items: vec![employee(5, "Eve", 27, "Class F")],
                total: 9,
                has_more: true,
                current_page: 1,
                total_pages: 5,
            }),
        );

        let page = state.visible();
        assert_eq!(ids(&page), vec![5]);
        assert_eq!(page.total, 9);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_more);
    }

    #[test]
    fn page_requests_mirror_the_view_state() {
        let mut state = state_with(vec![], 25);
        state.set_sort_field(SortField::Name);
        state.set_sort_field(SortField::Name);

        let request = state.page_request();
        assert_eq!(request.limit, 25);
        assert_eq!(request.offset, 0);
        assert_eq!(request.sort_by.as_deref(), Some("name"));
        assert_eq!(request.sort_order, Some(SortOrder::Desc));

        state.set_filter_name("  ");
        assert_eq!(state.filter_request(), None);
        state.set_filter_name("an");
        let filter = state.filter_request().unwrap();
        assert_eq!(filter.name.as_deref(), Some("an"));
        assert_eq!(filter.class, None);
    }
}
