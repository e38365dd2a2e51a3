//! Wire format of the questionnaire backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionId, QuestionType, Questionary, Statistics};

/// Body of the create request.
///
/// `statistics` and `options` of each question are always present in the JSON
/// object and carry `null` when the document has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionaryRequest {
    pub id: u64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub options: WireOptions,
    pub questions: Vec<WireQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOptions {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub answers_limit: u32,
    pub anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub statistics: Option<Statistics>,
    pub options: Option<Vec<String>>,
}

impl From<&Question> for WireQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            question_type: question.question_type,
            statistics: question.statistics.clone(),
            options: question.options.clone(),
        }
    }
}

impl CreateQuestionaryRequest {
    /// Serialize `questionary` as submitted at `created_at`
    pub fn from_questionary(questionary: &Questionary, created_at: DateTime<Utc>) -> Self {
        Self {
            id: questionary.id,
            title: questionary.title.clone(),
            created_at,
            options: WireOptions {
                start_date: questionary.options.start_date,
                end_date: questionary.options.end_date,
                answers_limit: questionary.options.answers_limit,
                anonymous: questionary.options.anonymous,
            },
            questions: questionary.questions.iter().map(WireQuestion::from).collect(),
        }
    }
}
