//! Properties of the undo/redo state machine driven through the public API

use chrono::{TimeZone, Utc};
use questionary_cli::form::{FormAction, HistoryState, IdPolicy, MoveGesture, reduce, reorder_action, replay};
use questionary_cli::model::{DraftDefaults, Question, QuestionType, Questionary};
use std::sync::Arc;

fn draft() -> Questionary {
    Questionary::untitled(
        Utc.with_ymd_and_hms(2024, 9, 2, 14, 0, 0).unwrap(),
        DraftDefaults::default(),
    )
}

fn three_question_draft() -> Questionary {
    let mut doc = draft();
    doc.questions = vec![
        Question::multiple_choice(1, "Q1").with_options(["yes", "no"]),
        Question::new(2, "Q2", QuestionType::Text),
        Question::new(3, "Q3", QuestionType::Boolean),
    ];
    doc
}

fn ids(state: &HistoryState) -> Vec<u64> {
    state.present().question_ids()
}

fn edits() -> Vec<FormAction> {
    vec![
        FormAction::SetTitle("Team health check".to_string()),
        FormAction::AddQuestion,
        FormAction::AddOption(1),
        FormAction::UpdateOption {
            id: 1,
            option_index: 0,
            value: "Great".to_string(),
        },
        FormAction::UpdateQuestionType {
            id: 2,
            question_type: QuestionType::Boolean,
        },
        FormAction::CloneQuestion(1),
        FormAction::RemoveQuestion(2),
    ]
}

#[test]
fn test_undo_everything_then_redo_everything() {
    let initial = HistoryState::new(draft());
    let start = initial.snapshot();
    let actions = edits();

    let edited = replay(initial, &actions);
    let after_edits = edited.snapshot();

    let undone = replay(edited, &vec![FormAction::Undo; actions.len()]);
    assert_eq!(undone.present(), start.as_ref());
    assert!(!undone.can_undo());
    assert_eq!(undone.future_len(), actions.len());

    let redone = replay(undone, &vec![FormAction::Redo; actions.len()]);
    assert_eq!(redone.present(), after_edits.as_ref());
    assert!(!redone.can_redo());
}

#[test]
fn test_new_edit_after_undo_discards_redo_branch() {
    let state = replay(
        HistoryState::new(draft()),
        &[FormAction::AddQuestion, FormAction::Undo],
    );
    let state = reduce(state, &FormAction::SetTitle("Branch".to_string()));
    let after_branch = state.clone();

    let state = reduce(state, &FormAction::Redo);
    assert_eq!(state, after_branch);
    assert_eq!(state.present().title, "Branch");
    assert_eq!(ids(&state), vec![1]);
}

#[test]
fn test_add_twice_undo_twice_redo_once() {
    let state = HistoryState::new(draft());
    let initial = state.snapshot();

    let state = reduce(state, &FormAction::AddQuestion);
    let after_first_add = state.snapshot();
    let state = replay(
        state,
        &[FormAction::AddQuestion, FormAction::Undo, FormAction::Undo],
    );
    assert_eq!(state.present(), initial.as_ref());

    let state = reduce(state, &FormAction::Redo);
    assert_eq!(state.present(), after_first_add.as_ref());
    assert_eq!(ids(&state), vec![1, 2]);
}

#[test]
fn test_type_change_gates_options() {
    let state = HistoryState::new(three_question_draft());

    let state = reduce(
        state,
        &FormAction::UpdateQuestionType {
            id: 1,
            question_type: QuestionType::Text,
        },
    );
    assert_eq!(state.present().questions[0].options, None);

    let state = reduce(
        state,
        &FormAction::UpdateQuestionType {
            id: 2,
            question_type: QuestionType::MultipleChoice,
        },
    );
    assert_eq!(state.present().questions[1].options, Some(Vec::new()));
    assert!(state.present().questions.iter().all(Question::options_match_type));
}

#[test]
fn test_add_option_only_touches_multiple_choice() {
    let state = HistoryState::new(three_question_draft());

    let state = reduce(state, &FormAction::AddOption(1));
    assert_eq!(state.present().questions[0].option_list(), ["yes", "no", ""]);

    let before = state.present().clone();
    let state = reduce(state, &FormAction::AddOption(2));
    assert_eq!(state.present(), &before);
    // Still an undo step, even though nothing changed
    assert_eq!(state.past_len(), 2);
}

#[test]
fn test_reorder_first_to_last() {
    let state = HistoryState::new(three_question_draft());
    let action = reorder_action(&state.present().questions, MoveGesture::new(0, 2)).unwrap();

    let state = reduce(state, &action);
    assert_eq!(ids(&state), vec![2, 3, 1]);
    assert_eq!(state.past_len(), 1);

    // One undo restores the whole move
    let state = reduce(state, &FormAction::Undo);
    assert_eq!(ids(&state), vec![1, 2, 3]);
    assert!(!state.can_undo());
}

#[test]
fn test_clone_is_placed_after_its_original() {
    let state = reduce(HistoryState::new(three_question_draft()), &FormAction::CloneQuestion(2));

    let questions = &state.present().questions;
    assert_eq!(ids(&state), vec![1, 2, 4, 3]);
    assert_eq!(questions[2].text, "Copy of Q2");
    assert_eq!(questions[2].question_type, QuestionType::Text);
}

#[test]
fn test_ids_stay_unique_after_remove_and_add() {
    let actions = [FormAction::RemoveQuestion(2), FormAction::AddQuestion];

    let state = replay(HistoryState::new(three_question_draft()), &actions);
    assert_eq!(ids(&state), vec![1, 3, 4]);
    assert!(state.present().validate().is_empty());

    let legacy = replay(
        HistoryState::new(three_question_draft()).with_id_policy(IdPolicy::Length),
        &actions,
    );
    assert_eq!(ids(&legacy), vec![1, 3, 3]);
    assert!(!legacy.present().validate().is_empty());
}

#[test]
fn test_unknown_action_keeps_identical_snapshot() {
    let state = reduce(HistoryState::new(draft()), &FormAction::AddQuestion);
    let present = state.snapshot();
    let past_len = state.past_len();

    let state = reduce(state, &FormAction::Unknown);
    assert!(Arc::ptr_eq(&present, &state.snapshot()));
    assert_eq!(state.past_len(), past_len);
}
