//! Draft files on disk and their wire rendering

use chrono::{TimeZone, Utc};
use questionary_cli::api::CreateQuestionaryRequest;
use questionary_cli::model::Questionary;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

fn temp_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("questionary-cli-drafts-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

const DRAFT: &str = r#"{
    "id": 1717236000000,
    "title": "Event feedback",
    "options": {
        "startDate": "2024-06-01T10:00:00Z",
        "endDate": "2024-06-30T10:00:00Z",
        "answersLimit": 50
    },
    "questions": [
        {"id": 1, "text": "How was it?", "type": "MULTIPLE_CHOICE", "options": ["Good", "Bad"]},
        {"id": 2, "text": "Would you come again?", "type": "BOOLEAN"}
    ]
}"#;

#[test]
fn test_draft_without_anonymous_flag_defaults_to_anonymous() {
    let draft = Questionary::from_json_str(DRAFT).unwrap();
    assert!(draft.options.anonymous);
    assert_eq!(draft.questions[1].options, None);
    assert_eq!(draft.questions[1].statistics, None);
}

#[test]
fn test_draft_survives_save_and_load() {
    let path = temp_file("event-feedback.json");
    let draft = Questionary::from_json_str(DRAFT).unwrap();

    draft.save(&path).unwrap();
    let loaded = Questionary::load(&path).unwrap();
    assert_eq!(loaded, draft);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_rejects_inconsistent_draft() {
    let path = temp_file("duplicate-ids.json");
    let broken = DRAFT.replace(r#""id": 2"#, r#""id": 1"#);
    fs::write(&path, broken).unwrap();

    assert!(Questionary::load(&path).is_err());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_identified_draft_is_sent_as_identified() {
    let mut draft = Questionary::from_json_str(DRAFT).unwrap();
    draft.options.anonymous = false;
    let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    let body = serde_json::to_value(CreateQuestionaryRequest::from_questionary(&draft, created_at)).unwrap();

    assert_eq!(body["options"]["anonymous"], json!(false));
    assert_eq!(body["questions"][1]["options"], json!(null));
    assert_eq!(body["questions"][1]["statistics"], json!(null));
    assert_eq!(body["questions"][0]["options"], json!(["Good", "Bad"]));
}
