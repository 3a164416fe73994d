//! Application layer: the picker session object and the conversation controller.

pub mod catalog_loader;
pub mod conversation;
pub mod prompts;
pub mod session;

pub use catalog_loader::load_catalog;
pub use conversation::{ChatOutcome, ConversationController, RoutineOutcome};
pub use session::{PickerSession, SessionHandle};
