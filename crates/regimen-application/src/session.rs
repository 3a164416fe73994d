//! The picker session: the single owner of all mutable UI state.
//!
//! Every mutation records which projections it invalidated. The front-end
//! drains them with [`PickerSession::take_invalidated`] and redraws exactly
//! those views.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use regimen_core::catalog::{Catalog, ProductId, filter};
use regimen_core::config::AppConfig;
use regimen_core::generation::GenerationError;
use regimen_core::projection::{
    ChatView, ControlsView, GridView, SelectionListView, View, project_chat, project_controls,
    project_grid, project_selection,
};
use regimen_core::selection::{SelectionChange, SelectionSet, SelectionStore};
use regimen_core::session::{ChatMessage, EntryId, GenerationState, Transcript};
use regimen_core::view::ViewState;

use crate::prompts;

/// Result of asking the session to start a routine request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineStart {
    AlreadyInFlight,
    EmptySelection,
    Ready {
        messages: Vec<ChatMessage>,
        placeholder: EntryId,
    },
}

pub struct PickerSession {
    catalog: Catalog,
    selection: SelectionSet,
    view: ViewState,
    transcript: Transcript,
    generation: GenerationState,
    last_routine: Option<String>,
    store: Arc<dyn SelectionStore>,
    context_window: usize,
    invalidated: BTreeSet<View>,
}

impl PickerSession {
    /// Builds a session around a loaded catalog and restores the persisted selection.
    ///
    /// Persisted ids that no longer resolve are pruned and the pruned set is
    /// written back, but only when the catalog actually loaded.
    pub fn new(catalog: Catalog, store: Arc<dyn SelectionStore>, config: &AppConfig) -> Self {
        let mut selection = SelectionSet::from_ids(store.load());
        if catalog.is_loaded() {
            let pruned = selection.retain_known(&catalog);
            if pruned > 0 {
                tracing::info!(pruned, "Dropped stale product ids from persisted selection");
                store.save(selection.ids());
            }
        }

        let mut transcript = Transcript::new();
        transcript.push_assistant(prompts::GREETING);

        Self {
            catalog,
            selection,
            view: ViewState::new(config.page_size),
            transcript,
            generation: GenerationState::Idle,
            last_routine: None,
            store,
            context_window: config.context_window,
            invalidated: BTreeSet::from([
                View::Grid,
                View::SelectionList,
                View::Chat,
                View::Controls,
            ]),
        }
    }

    // ============================================================================
    // Selection model
    // ============================================================================

    /// Toggles a catalog product. Unknown ids are ignored and return `None`.
    pub fn toggle_selection(&mut self, id: ProductId) -> Option<SelectionChange> {
        if !self.catalog.contains(id) {
            tracing::debug!(id, "Ignoring toggle of unknown product");
            return None;
        }
        let change = self.selection.toggle(id);
        self.selection_changed();
        Some(change)
    }

    pub fn remove_selection(&mut self, id: ProductId) -> bool {
        let removed = self.selection.remove(id);
        if removed {
            self.selection_changed();
        }
        removed
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selection_changed();
    }

    fn selection_changed(&mut self) {
        self.store.save(self.selection.ids());
        self.invalidate(View::Grid);
        self.invalidate(View::SelectionList);
    }

    // ============================================================================
    // Pagination / filter controller
    // ============================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.view.set_search_query(query);
        self.invalidate(View::Grid);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.view.set_category(category);
        self.invalidate(View::Grid);
    }

    pub fn show_more(&mut self) {
        self.view.show_more();
        self.invalidate(View::Grid);
    }

    /// Flips a card's description. Returns the new expanded state.
    pub fn toggle_expanded(&mut self, id: ProductId) -> bool {
        let expanded = self.view.toggle_expanded(id);
        self.invalidate(View::Grid);
        expanded
    }

    // ============================================================================
    // Projections
    // ============================================================================

    /// Projects the grid. An empty filtered list also resets the reveal count.
    pub fn grid_view(&mut self) -> GridView {
        if self.catalog.is_loaded()
            && filter(
                self.catalog.products(),
                self.view.category_filter(),
                self.view.search_query(),
            )
            .is_empty()
        {
            self.view.reset_reveal();
        }
        project_grid(&self.catalog, &self.view, &self.selection)
    }

    pub fn selection_view(&self) -> SelectionListView {
        project_selection(&self.catalog, &self.selection)
    }

    pub fn chat_view(&self) -> ChatView {
        project_chat(&self.transcript)
    }

    pub fn controls_view(&self) -> ControlsView {
        project_controls(self.generation, self.last_routine.as_deref())
    }

    /// Drains the set of views invalidated since the last call.
    pub fn take_invalidated(&mut self) -> Vec<View> {
        std::mem::take(&mut self.invalidated).into_iter().collect()
    }

    fn invalidate(&mut self, view: View) {
        self.invalidated.insert(view);
    }

    // ============================================================================
    // Conversation state
    // ============================================================================

    pub(crate) fn begin_routine(&mut self) -> RoutineStart {
        if self.generation.is_generating() {
            return RoutineStart::AlreadyInFlight;
        }
        if self.selection.is_empty() {
            self.transcript
                .push_assistant(prompts::EMPTY_SELECTION_GUIDANCE);
            self.invalidate(View::Chat);
            return RoutineStart::EmptySelection;
        }

        let products = self.selection.resolve(&self.catalog);
        let messages = prompts::routine_messages(&products);
        let placeholder = self
            .transcript
            .push_placeholder(prompts::GENERATING_PLACEHOLDER);
        self.generation = GenerationState::GeneratingRoutine;
        self.invalidate(View::Chat);
        self.invalidate(View::Controls);

        RoutineStart::Ready {
            messages,
            placeholder,
        }
    }

    pub(crate) fn finish_routine(
        &mut self,
        placeholder: EntryId,
        result: &Result<String, GenerationError>,
    ) {
        self.transcript.remove_transient(placeholder);
        match result {
            Ok(text) => {
                let trimmed = text.trim().to_string();
                self.last_routine = Some(trimmed.clone());
                self.transcript.push_assistant(trimmed);
            }
            Err(_) => {
                self.transcript.push_assistant(prompts::ROUTINE_APOLOGY);
            }
        }
        self.invalidate(View::Chat);
        self.invalidate(View::Controls);
    }

    /// Returns to `Idle`. Also drops the placeholder if the request never finished.
    pub(crate) fn end_routine(&mut self, placeholder: EntryId) {
        if self.transcript.remove_transient(placeholder) {
            self.invalidate(View::Chat);
        }
        self.generation = GenerationState::Idle;
        self.invalidate(View::Controls);
    }

    /// Appends the user turn and returns the context window to send upstream.
    pub(crate) fn begin_chat(&mut self, text: &str) -> Vec<ChatMessage> {
        self.transcript.push_user(text);
        self.invalidate(View::Chat);
        self.transcript.recent_context(self.context_window)
    }

    pub(crate) fn finish_chat(&mut self, result: &Result<String, GenerationError>) {
        match result {
            Ok(text) => self.transcript.push_assistant(text.trim()),
            Err(_) => self.transcript.push_assistant(prompts::CHAT_APOLOGY),
        };
        self.invalidate(View::Chat);
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn generation_state(&self) -> GenerationState {
        self.generation
    }

    /// The last generated routine, for the copy action.
    pub fn copy_routine(&self) -> Option<&str> {
        self.last_routine.as_deref().filter(|text| !text.is_empty())
    }
}

/// Shared ownership of the session between the front-end and in-flight requests.
///
/// The lock is only ever held for synchronous sections, never across a
/// remote call.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<PickerSession>>,
}

impl SessionHandle {
    pub fn new(session: PickerSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PickerSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut PickerSession) -> R) -> R {
        f(&mut self.lock())
    }
}
