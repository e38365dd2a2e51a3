use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionId, QuestionType};

/// Partial update of the questionnaire options; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionsPatch {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub answers_limit: Option<u32>,
    pub anonymous: Option<bool>,
}

/// One discrete edit intent dispatched to the history reducer.
///
/// Serialized as `{"type": "ADD_OPTION", "payload": 3}` so action scripts can be
/// written by hand. Tags this build does not know deserialize to
/// [`FormAction::Unknown`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum FormAction {
    SetTitle(String),
    AddQuestion,
    UpdateQuestionTitle { id: QuestionId, title: String },
    UpdateQuestionType { id: QuestionId, question_type: QuestionType },
    AddOption(QuestionId),
    UpdateOption { id: QuestionId, option_index: usize, value: String },
    RemoveOption { id: QuestionId, option_index: usize },
    RemoveQuestion(QuestionId),
    CloneQuestion(QuestionId),
    ReorderQuestions(Vec<Question>),
    SetOptions(OptionsPatch),
    Undo,
    Redo,
    #[serde(other)]
    Unknown,
}

impl FormAction {
    /// Whether applying this action records a history entry
    pub fn is_mutating(&self) -> bool {
        !matches!(self, FormAction::Undo | FormAction::Redo | FormAction::Unknown)
    }

    /// Wire tag of the action, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            FormAction::SetTitle(_) => "SET_TITLE",
            FormAction::AddQuestion => "ADD_QUESTION",
            FormAction::UpdateQuestionTitle { .. } => "UPDATE_QUESTION_TITLE",
            FormAction::UpdateQuestionType { .. } => "UPDATE_QUESTION_TYPE",
            FormAction::AddOption(_) => "ADD_OPTION",
            FormAction::UpdateOption { .. } => "UPDATE_OPTION",
            FormAction::RemoveOption { .. } => "REMOVE_OPTION",
            FormAction::RemoveQuestion(_) => "REMOVE_QUESTION",
            FormAction::CloneQuestion(_) => "CLONE_QUESTION",
            FormAction::ReorderQuestions(_) => "REORDER_QUESTIONS",
            FormAction::SetOptions(_) => "SET_OPTIONS",
            FormAction::Undo => "UNDO",
            FormAction::Redo => "REDO",
            FormAction::Unknown => "UNKNOWN",
        }
    }
}
