//! Questionnaire backend API
//!
//! Wire models, the reqwest-based client, submission of finished documents and
//! the statistics endpoint used by the dashboard summary.

pub mod client;
pub mod constants;
pub mod error;
pub mod models;
pub mod statistics;
pub mod submission;

pub use client::{QuestionaryClient, QuestionaryTransport};
pub use error::{MISSING_TOKEN_MESSAGE, SUBMISSION_FAILED_MESSAGE, SubmissionError, TransportError, TransportFailure};
pub use models::{CreateQuestionaryRequest, WireOptions, WireQuestion};
pub use statistics::{DateRange, StatisticsSource, StatisticsSummary};
pub use submission::{SubmissionReceipt, Submitter};
