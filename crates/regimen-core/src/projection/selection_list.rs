//! Selected-products chip list projection.

use serde::Serialize;

use crate::catalog::{Catalog, ProductId};
use crate::selection::SelectionSet;

pub const NO_SELECTION_MESSAGE: &str = "No products selected yet.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionChip {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum SelectionListView {
    Empty,
    Chips { chips: Vec<SelectionChip> },
}

impl SelectionListView {
    pub fn chips(&self) -> &[SelectionChip] {
        match self {
            Self::Chips { chips } => chips,
            Self::Empty => &[],
        }
    }
}

/// One chip per selected id, in selection order. Ids that no longer resolve are skipped.
pub fn project_selection(catalog: &Catalog, selection: &SelectionSet) -> SelectionListView {
    if selection.is_empty() {
        return SelectionListView::Empty;
    }

    let chips = selection
        .resolve(catalog)
        .into_iter()
        .map(|product| SelectionChip {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
        })
        .collect();

    SelectionListView::Chips { chips }
}
