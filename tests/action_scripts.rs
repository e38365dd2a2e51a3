//! Hand-written action scripts as accepted by `questionary-cli apply`

use chrono::{TimeZone, Utc};
use questionary_cli::form::{FormAction, HistoryState, replay};
use questionary_cli::model::{DraftDefaults, QuestionType, Questionary};

const SCRIPT: &str = r#"[
    {"type": "SET_TITLE", "payload": "Quarterly pulse"},
    {"type": "ADD_QUESTION"},
    {"type": "UPDATE_QUESTION_TITLE", "payload": {"id": 2, "title": "Any comments?"}},
    {"type": "UPDATE_QUESTION_TYPE", "payload": {"id": 2, "questionType": "TEXT"}},
    {"type": "ADD_OPTION", "payload": 1},
    {"type": "UPDATE_OPTION", "payload": {"id": 1, "optionIndex": 0, "value": "Happy"}},
    {"type": "SET_OPTIONS", "payload": {"answersLimit": 25, "anonymous": false}},
    {"type": "SHUFFLE_EVERYTHING"},
    {"type": "UNDO"},
    {"type": "REDO"}
]"#;

fn draft() -> Questionary {
    Questionary::untitled(
        Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
        DraftDefaults::default(),
    )
}

#[test]
fn test_script_parses_with_unknown_actions() {
    let actions: Vec<FormAction> = serde_json::from_str(SCRIPT).unwrap();
    assert_eq!(actions.len(), 10);
    assert_eq!(actions[7], FormAction::Unknown);
    assert_eq!(actions.iter().filter(|a| a.is_mutating()).count(), 7);
}

#[test]
fn test_script_replays_to_expected_document() {
    let actions: Vec<FormAction> = serde_json::from_str(SCRIPT).unwrap();
    let state = replay(HistoryState::new(draft()), &actions);
    let doc = state.present();

    assert_eq!(doc.title, "Quarterly pulse");
    assert_eq!(doc.question_ids(), vec![1, 2]);
    assert_eq!(doc.questions[0].option_list(), ["Happy"]);
    assert_eq!(doc.questions[1].text, "Any comments?");
    assert_eq!(doc.questions[1].question_type, QuestionType::Text);
    assert_eq!(doc.questions[1].options, None);
    assert_eq!(doc.options.answers_limit, 25);
    assert!(!doc.options.anonymous);
    assert_eq!(state.past_len(), 7);
    assert!(!state.can_redo());
}
