//! Undoable questionnaire editing
//!
//! Edits are expressed as [`FormAction`] values and applied through the
//! [`reduce`] state machine, which keeps the document, its undo stack and its
//! redo branch consistent. Nothing in here performs I/O.

pub mod action;
pub mod history;
pub mod ids;
pub mod reorder;
pub mod transform;

pub use action::{FormAction, OptionsPatch};
pub use history::{HistoryState, reduce, replay};
pub use ids::IdPolicy;
pub use reorder::{MoveGesture, move_item, reorder_action};
