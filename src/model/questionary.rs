use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::question::{Question, QuestionId};

pub const DEFAULT_TITLE: &str = "Untitled questionnaire";
pub const DEFAULT_QUESTION_TEXT: &str = "Question";
pub const DEFAULT_ANSWERS_LIMIT: u32 = 100;
pub const DEFAULT_WINDOW_DAYS: i64 = 365;
pub const MAX_WINDOW_DAYS: i64 = 3650;

fn default_anonymous() -> bool {
    true
}

/// Submission window and answer settings of a questionnaire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionaryOptions {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub answers_limit: u32,
    #[serde(default = "default_anonymous")]
    pub anonymous: bool,
}

/// The document being edited: a titled, ordered list of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionary {
    pub id: u64,
    pub title: String,
    pub options: QuestionaryOptions,
    pub questions: Vec<Question>,
}

/// Values used when starting a fresh draft
#[derive(Debug, Clone, Copy)]
pub struct DraftDefaults {
    pub answers_limit: u32,
    pub window_days: i64,
}

impl Default for DraftDefaults {
    fn default() -> Self {
        Self {
            answers_limit: DEFAULT_ANSWERS_LIMIT,
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl Questionary {
    /// A fresh single-question draft opened at `now`.
    ///
    /// The id is the creation time in epoch milliseconds.
    pub fn untitled(now: DateTime<Utc>, defaults: DraftDefaults) -> Self {
        let window = TimeDelta::try_days(defaults.window_days.clamp(0, MAX_WINDOW_DAYS))
            .unwrap_or_else(TimeDelta::zero);
        Self {
            id: now.timestamp_millis().max(0) as u64,
            title: DEFAULT_TITLE.to_string(),
            options: QuestionaryOptions {
                start_date: now,
                end_date: now.checked_add_signed(window).unwrap_or(now),
                answers_limit: defaults.answers_limit.max(1),
                anonymous: true,
            },
            questions: vec![Question::multiple_choice(1, DEFAULT_QUESTION_TEXT)],
        }
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn position(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions.iter().map(|q| q.id).collect()
    }

    /// Structural problems of this document, empty when it is well formed
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                problems.push(format!("Duplicate question id {}", question.id));
            }
            if !question.options_match_type() {
                problems.push(format!(
                    "Question {} of type {} {} options",
                    question.id,
                    question.question_type,
                    if question.options.is_some() { "must not have" } else { "must have" }
                ));
            }
        }

        if self.options.answers_limit == 0 {
            problems.push("Answers limit must be positive".to_string());
        }
        if self.options.start_date > self.options.end_date {
            problems.push("Start date is after end date".to_string());
        }

        problems
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse questionnaire JSON")
    }

    /// Load a draft from a JSON file and reject malformed documents
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading questionnaire from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read questionnaire file: {:?}", path))?;
        let questionary = Self::from_json_str(&content)
            .with_context(|| format!("Invalid questionnaire file: {:?}", path))?;

        let problems = questionary.validate();
        if !problems.is_empty() {
            anyhow::bail!("Questionnaire {:?} is invalid: {}", path, problems.join("; "));
        }

        Ok(questionary)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize questionnaire")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write questionnaire file: {:?}", path))?;
        debug!("Saved questionnaire {} to {:?}", self.id, path);
        Ok(())
    }
}

impl Default for Questionary {
    fn default() -> Self {
        Self::untitled(Utc::now(), DraftDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_untitled_draft_has_single_question() {
        let draft = Questionary::untitled(fixed_now(), DraftDefaults::default());
        assert_eq!(draft.title, DEFAULT_TITLE);
        assert_eq!(draft.id, fixed_now().timestamp_millis() as u64);
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].id, 1);
        assert_eq!(draft.questions[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(draft.options.answers_limit, 100);
        assert!(draft.options.anonymous);
        assert_eq!(draft.options.end_date - draft.options.start_date, TimeDelta::days(365));
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_untitled_window_stays_within_bounds() {
        let negative = DraftDefaults { window_days: -30, ..DraftDefaults::default() };
        let draft = Questionary::untitled(fixed_now(), negative);
        assert_eq!(draft.options.end_date, draft.options.start_date);
        assert!(draft.validate().is_empty());

        let huge = DraftDefaults { window_days: i64::MAX, ..DraftDefaults::default() };
        let draft = Questionary::untitled(fixed_now(), huge);
        assert_eq!(
            draft.options.end_date - draft.options.start_date,
            TimeDelta::days(MAX_WINDOW_DAYS)
        );
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_duplicate_ids_and_option_gate() {
        let mut draft = Questionary::untitled(fixed_now(), DraftDefaults::default());
        draft.questions.push(Question::new(1, "dup", QuestionType::Text).with_options(["x"]));
        let problems = draft.validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("Duplicate question id 1"));
        assert!(problems[1].contains("must not have"));
    }

    #[test]
    fn test_anonymous_defaults_to_true_when_absent() {
        let json = r#"{
            "id": 5,
            "title": "Feedback",
            "options": {
                "startDate": "2024-01-01T00:00:00Z",
                "endDate": "2024-02-01T00:00:00Z",
                "answersLimit": 10
            },
            "questions": []
        }"#;
        let questionary = Questionary::from_json_str(json).unwrap();
        assert!(questionary.options.anonymous);
        assert_eq!(questionary.options.answers_limit, 10);
    }
}
