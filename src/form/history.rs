//! Linear undo/redo over questionnaire snapshots

use log::debug;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::model::Questionary;

use super::action::FormAction;
use super::ids::IdPolicy;
use super::transform;

/// The editor's document together with its undo and redo stacks.
///
/// `past` is oldest first, `future` is most recently undone first. Snapshots are
/// shared immutable values, so moving between the stacks never copies a
/// document.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    past: Vec<Arc<Questionary>>,
    present: Arc<Questionary>,
    future: VecDeque<Arc<Questionary>>,
    ids: IdPolicy,
    limit: Option<usize>,
}

impl HistoryState {
    pub fn new(initial: Questionary) -> Self {
        Self {
            past: Vec::new(),
            present: Arc::new(initial),
            future: VecDeque::new(),
            ids: IdPolicy::default(),
            limit: None,
        }
    }

    pub fn with_id_policy(mut self, ids: IdPolicy) -> Self {
        self.ids = ids;
        self
    }

    /// Cap the number of undo steps kept; `None` keeps everything
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self.trim_past();
        self
    }

    pub fn present(&self) -> &Questionary {
        &self.present
    }

    /// Shared handle to the present document, e.g. for submission
    pub fn snapshot(&self) -> Arc<Questionary> {
        Arc::clone(&self.present)
    }

    pub fn past(&self) -> &[Arc<Questionary>] {
        &self.past
    }

    pub fn future(&self) -> &VecDeque<Arc<Questionary>> {
        &self.future
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.ids
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Consume the state and return the one after `action`
    pub fn dispatch(self, action: &FormAction) -> Self {
        reduce(self, action)
    }

    fn push_past(&mut self, snapshot: Arc<Questionary>) {
        self.past.push(snapshot);
        self.trim_past();
    }

    fn trim_past(&mut self) {
        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }
}

/// The history state machine.
///
/// Mutating actions record the previous present and discard the redo branch.
/// Undo on an empty past, redo on an empty future and unknown actions hand the
/// state back as is.
pub fn reduce(mut state: HistoryState, action: &FormAction) -> HistoryState {
    state.apply(action);
    state
}

/// Run a whole action script through the reducer, in order
pub fn replay<'a, I>(state: HistoryState, actions: I) -> HistoryState
where
    I: IntoIterator<Item = &'a FormAction>,
{
    actions.into_iter().fold(state, reduce)
}

impl HistoryState {
    /// Apply `action` in place. Returns false when the state was left untouched.
    pub fn apply(&mut self, action: &FormAction) -> bool {
        match action {
            FormAction::Undo => {
                let Some(previous) = self.past.pop() else {
                    return false;
                };
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push_front(current);
            }
            FormAction::Redo => {
                let Some(next) = self.future.pop_front() else {
                    return false;
                };
                let current = std::mem::replace(&mut self.present, next);
                self.push_past(current);
            }
            action => {
                let Some(next) = transform::apply(&self.present, action, self.ids) else {
                    return false;
                };
                let current = std::mem::replace(&mut self.present, Arc::new(next));
                self.push_past(current);
                self.future.clear();
            }
        }

        debug!(
            "Applied {} (past: {}, future: {}, questions: {})",
            action.kind(),
            self.past.len(),
            self.future.len(),
            self.present.questions.len()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DraftDefaults;
    use chrono::{TimeZone, Utc};

    fn initial() -> HistoryState {
        HistoryState::new(Questionary::untitled(
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap(),
            DraftDefaults::default(),
        ))
    }

    #[test]
    fn test_mutation_pushes_past_and_clears_future() {
        let state = initial()
            .dispatch(&FormAction::AddQuestion)
            .dispatch(&FormAction::Undo);
        assert_eq!(state.future_len(), 1);

        let state = state.dispatch(&FormAction::SetTitle("Retro".to_string()));
        assert_eq!(state.past_len(), 1);
        assert_eq!(state.future_len(), 0);
        assert_eq!(state.present().title, "Retro");
    }

    #[test]
    fn test_undo_and_redo_on_empty_stacks_are_noops() {
        let state = initial();
        let before = state.snapshot();

        let state = state.dispatch(&FormAction::Undo);
        assert!(Arc::ptr_eq(&before, &state.snapshot()));

        let state = state.dispatch(&FormAction::Redo);
        assert!(Arc::ptr_eq(&before, &state.snapshot()));
        assert_eq!(state.past_len(), 0);
        assert_eq!(state.future_len(), 0);
    }

    #[test]
    fn test_unknown_action_returns_identical_state() {
        let state = initial().dispatch(&FormAction::AddQuestion);
        let expected = state.clone();
        let present = state.snapshot();

        let state = state.dispatch(&FormAction::Unknown);
        assert!(Arc::ptr_eq(&present, &state.snapshot()));
        assert_eq!(state, expected);
    }

    #[test]
    fn test_edit_of_missing_question_still_records_history() {
        let state = initial().dispatch(&FormAction::RemoveQuestion(99));
        assert_eq!(state.past_len(), 1);
        assert_eq!(state.present(), state.past()[0].as_ref());
    }

    #[test]
    fn test_undo_moves_present_to_front_of_future() {
        let state = initial()
            .dispatch(&FormAction::SetTitle("A".to_string()))
            .dispatch(&FormAction::SetTitle("B".to_string()))
            .dispatch(&FormAction::Undo)
            .dispatch(&FormAction::Undo);

        let future: Vec<_> = state.future().iter().map(|q| q.title.clone()).collect();
        assert_eq!(future, vec!["A".to_string(), "B".to_string()]);
        assert!(!state.can_undo());
        assert!(state.can_redo());
    }

    #[test]
    fn test_apply_reports_whether_state_changed() {
        let mut state = initial();
        assert!(!state.apply(&FormAction::Undo));
        assert!(state.apply(&FormAction::AddQuestion));
        assert!(!state.apply(&FormAction::Redo));
        assert!(state.apply(&FormAction::Undo));
        assert!(state.apply(&FormAction::Redo));
        assert_eq!(state.present().questions.len(), 2);
    }

    #[test]
    fn test_history_limit_drops_oldest_snapshots() {
        let mut state = initial().with_limit(Some(2));
        for title in ["one", "two", "three"] {
            state = state.dispatch(&FormAction::SetTitle(title.to_string()));
        }

        assert_eq!(state.past_len(), 2);
        let past: Vec<_> = state.past().iter().map(|q| q.title.clone()).collect();
        assert_eq!(past, vec!["one".to_string(), "two".to_string()]);
    }
}
