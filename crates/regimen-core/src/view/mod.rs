//! Listing view state: filter inputs, pagination cursor and expanded cards.

mod state;

pub use state::{Page, ViewState};
