//! The ordered selection set.

use crate::catalog::{Catalog, Product, ProductId};

/// What a `toggle` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added,
    Removed,
}

/// Ordered sequence of selected product ids with no duplicates.
///
/// Insertion order is kept: re-adding an id after removing it places it at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<ProductId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from persisted ids, dropping duplicates after the first occurrence.
    pub fn from_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut set = Self::new();
        for id in ids {
            if !set.contains(id) {
                set.ids.push(id);
            }
        }
        set
    }

    pub fn toggle(&mut self, id: ProductId) -> SelectionChange {
        match self.position(id) {
            Some(index) => {
                self.ids.remove(index);
                SelectionChange::Removed
            }
            None => {
                self.ids.push(id);
                SelectionChange::Added
            }
        }
    }

    /// Returns whether the id was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops ids that do not resolve against the catalog. Returns how many were dropped.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| catalog.contains(*id));
        before - self.ids.len()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected products in selection order. Unknown ids are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.ids.iter().filter_map(|id| catalog.get(*id)).collect()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.ids.iter().position(|selected| *selected == id)
    }
}
