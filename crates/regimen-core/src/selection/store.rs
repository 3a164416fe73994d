//! Selection persistence trait.

use std::sync::Mutex;

use crate::catalog::ProductId;

/// Durable storage for the selection set.
///
/// Implementations absorb their own failures: `save` logs and no-ops when the
/// store is unavailable, and `load` returns an empty list on a missing, corrupt
/// or unreadable store. Neither ever interrupts a user-visible flow.
pub trait SelectionStore: Send + Sync {
    fn save(&self, ids: &[ProductId]);

    fn load(&self) -> Vec<ProductId>;
}

/// Keeps the selection in memory only. Used for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    ids: Mutex<Vec<ProductId>>,
}

impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(ids: Vec<ProductId>) -> Self {
        Self {
            ids: Mutex::new(ids),
        }
    }

    /// Snapshot of what was last saved.
    pub fn saved(&self) -> Vec<ProductId> {
        match self.ids.lock() {
            Ok(ids) => ids.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn save(&self, ids: &[ProductId]) {
        match self.ids.lock() {
            Ok(mut stored) => *stored = ids.to_vec(),
            Err(poisoned) => *poisoned.into_inner() = ids.to_vec(),
        }
    }

    fn load(&self) -> Vec<ProductId> {
        self.saved()
    }
}
