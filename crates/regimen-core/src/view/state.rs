//! Pagination/filter controller state.

use std::collections::HashSet;

use crate::catalog::ProductId;
use crate::config::DEFAULT_PAGE_SIZE;

/// How much of a filtered list is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of leading filtered products to render.
    pub visible: usize,
    /// Whether the "show more" control is shown.
    pub show_more: bool,
}

/// Session-local listing state. Never persisted.
///
/// `reveal_count` is always a positive multiple of `page_size`. It resets to
/// `page_size` whenever a filter input changes and grows by `page_size` on
/// every `show_more`. The counter is not clamped to the filtered length; only
/// the rendered slice is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_query: String,
    category_filter: String,
    reveal_count: usize,
    page_size: usize,
    expanded_ids: HashSet<ProductId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    /// `page_size` of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            search_query: String::new(),
            category_filter: String::new(),
            reveal_count: page_size,
            page_size,
            expanded_ids: HashSet::new(),
        }
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn category_filter(&self) -> &str {
        &self.category_filter
    }

    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.reset_reveal();
    }

    /// An empty string clears the category filter.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category_filter = category.into();
        self.reset_reveal();
    }

    pub fn show_more(&mut self) {
        self.reveal_count += self.page_size;
    }

    pub fn reset_reveal(&mut self) {
        self.reveal_count = self.page_size;
    }

    /// Flips the expanded state of a card and returns the new state.
    pub fn toggle_expanded(&mut self, id: ProductId) -> bool {
        if self.expanded_ids.remove(&id) {
            false
        } else {
            self.expanded_ids.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: ProductId) -> bool {
        self.expanded_ids.contains(&id)
    }

    /// Page geometry for a filtered list of `filtered_len` products.
    pub fn page(&self, filtered_len: usize) -> Page {
        Page {
            visible: self.reveal_count.min(filtered_len),
            show_more: self.reveal_count < filtered_len,
        }
    }
}
