//! Pure projections from session state to view-models.
//!
//! Each projection is recomputed and replaced wholesale on every redraw; the
//! draw step in the front-end is a thin adapter over these view-models.

mod chat;
mod controls;
mod grid;
mod selection_list;

pub use chat::{ChatLine, ChatView, project_chat};
pub use controls::{ControlsView, project_controls};
pub use grid::{
    GridView, LOAD_FAILED_MESSAGE, NO_MATCHES_MESSAGE, ProductCard, project_grid,
};
pub use selection_list::{
    NO_SELECTION_MESSAGE, SelectionChip, SelectionListView, project_selection,
};

use serde::{Deserialize, Serialize};

/// An independently invalidated projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum View {
    Grid,
    SelectionList,
    Chat,
    Controls,
}
