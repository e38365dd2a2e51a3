//! Questionnaire document model

pub mod question;
pub mod questionary;

pub use question::{Question, QuestionId, QuestionType, Statistics};
pub use questionary::{
    DEFAULT_ANSWERS_LIMIT, DEFAULT_QUESTION_TEXT, DEFAULT_TITLE, DEFAULT_WINDOW_DAYS, DraftDefaults,
    MAX_WINDOW_DAYS, Questionary, QuestionaryOptions,
};
