//! Flagged employee persistence
//!
//! The whole id set is serialized on every change. A corrupt stored value
//! degrades to an empty set with a log line and never reaches the caller.

use std::collections::BTreeSet;

use crate::store::{FLAGGED_EMPLOYEES_KEY, LocalStore, StoreResult};

/// Flag set persistence on top of the local store
#[derive(Clone)]
pub struct FlagStore {
    store: LocalStore,
}

impl FlagStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Load the stored flag set
    pub fn load(&self) -> StoreResult<BTreeSet<i64>> {
        let Some(raw) = self.store.get(FLAGGED_EMPLOYEES_KEY)? else {
            return Ok(BTreeSet::new());
        };

        match serde_json::from_str::<Vec<i64>>(&raw) {
            Ok(ids) => Ok(ids.into_iter().collect()),
            Err(error) => {
                tracing::warn!(%error, "Stored flag set is corrupt, starting empty");
                Ok(BTreeSet::new())
            }
        }
    }

    /// Persist the whole flag set
    pub fn save(&self, flags: &BTreeSet<i64>) -> StoreResult<()> {
        let ids: Vec<i64> = flags.iter().copied().collect();
        let raw = serde_json::to_string(&ids)?;
        self.store.set(FLAGGED_EMPLOYEES_KEY, &raw)
    }
}
