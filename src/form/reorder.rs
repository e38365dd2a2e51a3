use crate::model::Question;

use super::action::FormAction;

/// A completed move gesture: the item picked up at `source` was dropped at `destination`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGesture {
    pub source: usize,
    pub destination: usize,
}

impl MoveGesture {
    pub fn new(source: usize, destination: usize) -> Self {
        Self { source, destination }
    }
}

/// Move one element from `source` to `destination`, keeping the relative order
/// of everything else. `None` when either index is out of range.
pub fn move_item<T: Clone>(items: &[T], source: usize, destination: usize) -> Option<Vec<T>> {
    if source >= items.len() || destination >= items.len() {
        return None;
    }

    let mut reordered = items.to_vec();
    let item = reordered.remove(source);
    reordered.insert(destination, item);
    Some(reordered)
}

/// Turn a move gesture into a single REORDER_QUESTIONS action so that one undo
/// reverts the whole move. Dropping in place or out of range yields no action.
pub fn reorder_action(questions: &[Question], gesture: MoveGesture) -> Option<FormAction> {
    if gesture.source == gesture.destination {
        return None;
    }
    move_item(questions, gesture.source, gesture.destination).map(FormAction::ReorderQuestions)
}
