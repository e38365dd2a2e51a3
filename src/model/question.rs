use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a question, unique within its questionnaire
pub type QuestionId = u64;

/// Opaque per-question statistics as delivered by the backend
pub type Statistics = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Boolean,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::Text,
        QuestionType::Boolean,
    ];

    /// Human readable label used by the editor
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple choice",
            QuestionType::Text => "Text",
            QuestionType::Boolean => "Yes / No",
        }
    }

    /// The type that follows this one when cycling through all types
    pub fn next(self) -> Self {
        match self {
            QuestionType::MultipleChoice => QuestionType::Text,
            QuestionType::Text => QuestionType::Boolean,
            QuestionType::Boolean => QuestionType::MultipleChoice,
        }
    }

    pub fn has_options(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::Text => "TEXT",
            QuestionType::Boolean => "BOOLEAN",
        };
        f.write_str(tag)
    }
}

/// A single question of a questionnaire.
///
/// `options` is `Some` exactly when `question_type` is
/// [`QuestionType::MultipleChoice`]; every transform keeps that gate intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub statistics: Option<Statistics>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl Question {
    /// Create a question with empty statistics and options matching its type
    pub fn new(id: QuestionId, text: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id,
            text: text.into(),
            question_type,
            statistics: Some(Statistics::new()),
            options: question_type.has_options().then(Vec::new),
        }
    }

    pub fn multiple_choice(id: QuestionId, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionType::MultipleChoice)
    }

    /// Builder-style helper to attach answer options
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Options as a slice, empty when the question has none
    pub fn option_list(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Whether the presence of `options` matches the question type
    pub fn options_match_type(&self) -> bool {
        self.options.is_some() == self.question_type.has_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question_gates_options_by_type() {
        assert_eq!(Question::new(1, "q", QuestionType::MultipleChoice).options, Some(vec![]));
        assert_eq!(Question::new(2, "q", QuestionType::Text).options, None);
        assert_eq!(Question::new(3, "q", QuestionType::Boolean).options, None);
    }

    #[test]
    fn test_type_cycle_visits_all_types() {
        let mut current = QuestionType::MultipleChoice;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(current);
            current = current.next();
        }
        assert_eq!(seen, QuestionType::ALL.to_vec());
        assert_eq!(current, QuestionType::MultipleChoice);
    }

    #[test]
    fn test_question_serializes_with_wire_tags() {
        let question = Question::new(7, "Favourite colour?", QuestionType::Text);
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["type"], "TEXT");
        assert!(json["options"].is_null());
        assert_eq!(json["statistics"], serde_json::json!({}));
    }

    #[test]
    fn test_missing_statistics_and_options_deserialize_as_absent() {
        let question: Question =
            serde_json::from_str(r#"{"id": 3, "text": "Agree?", "type": "BOOLEAN"}"#).unwrap();
        assert_eq!(question.statistics, None);
        assert_eq!(question.options, None);
        assert!(question.options_match_type());
    }
}
