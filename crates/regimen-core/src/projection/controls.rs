//! Action controls projection.

use serde::Serialize;

use crate::session::GenerationState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    pub generate_enabled: bool,
    pub generate_label: &'static str,
    /// Busy spinner next to the generate label.
    pub busy: bool,
    /// Enabled once a routine has been generated.
    pub copy_enabled: bool,
}

pub fn project_controls(state: GenerationState, last_routine: Option<&str>) -> ControlsView {
    ControlsView {
        generate_enabled: state.generate_enabled(),
        generate_label: state.label(),
        busy: state.is_generating(),
        copy_enabled: last_routine.is_some_and(|text| !text.is_empty()),
    }
}
