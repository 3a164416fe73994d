//! File-backed selection persistence.

use std::path::PathBuf;

use regimen_core::catalog::ProductId;
use regimen_core::selection::SelectionStore;

use crate::storage::AtomicJsonFile;

/// Persists the selection as a JSON array of integers.
///
/// Every failure is logged and absorbed: a broken store degrades the session
/// to in-memory selection, it never interrupts the user.
pub struct JsonSelectionStore {
    file: AtomicJsonFile<Vec<ProductId>>,
}

impl JsonSelectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }
}

impl SelectionStore for JsonSelectionStore {
    fn save(&self, ids: &[ProductId]) {
        if let Err(err) = self.file.save(&ids.to_vec()) {
            tracing::warn!(
                path = %self.file.path().display(),
                error = %err,
                "Selection store unavailable, keeping selection in memory only"
            );
        }
    }

    fn load(&self) -> Vec<ProductId> {
        match self.file.load() {
            Ok(Some(ids)) => ids.into_iter().filter(|id| *id > 0).collect(),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %err,
                    "Could not read persisted selection, starting empty"
                );
                Vec::new()
            }
        }
    }
}
