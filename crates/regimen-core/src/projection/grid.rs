//! Catalog grid projection.

use serde::Serialize;

use crate::catalog::{Catalog, ProductId, filter};
use crate::selection::SelectionSet;
use crate::view::ViewState;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products.";
pub const NO_MATCHES_MESSAGE: &str = "No matching products.";

/// One card in the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub description: String,
    pub selected: bool,
    /// Keyed by product id, so it survives every re-render.
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GridView {
    /// Terminal placeholder after a failed catalog load.
    LoadFailed,
    /// Terminal placeholder when the filters match nothing.
    NoMatches,
    Cards {
        cards: Vec<ProductCard>,
        show_more: bool,
    },
}

impl GridView {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::LoadFailed => Some(LOAD_FAILED_MESSAGE),
            Self::NoMatches => Some(NO_MATCHES_MESSAGE),
            Self::Cards { .. } => None,
        }
    }

    pub fn cards(&self) -> &[ProductCard] {
        match self {
            Self::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn show_more(&self) -> bool {
        matches!(self, Self::Cards { show_more: true, .. })
    }
}

pub fn project_grid(catalog: &Catalog, view: &ViewState, selection: &SelectionSet) -> GridView {
    if !catalog.is_loaded() {
        return GridView::LoadFailed;
    }

    let filtered = filter(
        catalog.products(),
        view.category_filter(),
        view.search_query(),
    );
    if filtered.is_empty() {
        return GridView::NoMatches;
    }

    let page = view.page(filtered.len());
    let cards = filtered
        .into_iter()
        .take(page.visible)
        .map(|product| ProductCard {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            selected: selection.contains(product.id),
            expanded: view.is_expanded(product.id),
        })
        .collect();

    GridView::Cards {
        cards,
        show_more: page.show_more,
    }
}
