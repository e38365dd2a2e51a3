//! Submitting a finished questionnaire.
//!
//! The submitter only ever reads a snapshot of the document. It never touches
//! the editing history, so a failed submission leaves every edit in place.

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::sync::Arc;

use crate::auth::TokenSource;
use crate::model::Questionary;

use super::client::QuestionaryTransport;
use super::error::SubmissionError;
use super::models::CreateQuestionaryRequest;

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub questionary_id: u64,
    pub title: String,
    pub question_count: usize,
    pub submitted_at: DateTime<Utc>,
}

/// Looks up the bearer token and sends the document through a transport
#[derive(Clone)]
pub struct Submitter {
    tokens: Arc<dyn TokenSource>,
    transport: Arc<dyn QuestionaryTransport>,
}

impl Submitter {
    pub fn new(tokens: Arc<dyn TokenSource>, transport: Arc<dyn QuestionaryTransport>) -> Self {
        Self { tokens, transport }
    }

    pub async fn submit(&self, snapshot: Arc<Questionary>) -> Result<SubmissionReceipt, SubmissionError> {
        self.submit_at(snapshot, Utc::now()).await
    }

    /// Submit with an explicit submission time, which becomes `createdAt`
    pub async fn submit_at(
        &self,
        snapshot: Arc<Questionary>,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let token = match self.tokens.token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                warn!("No token available ({}), submission aborted", self.tokens.describe());
                return Err(SubmissionError::MissingToken);
            }
            Err(e) => {
                error!("Token lookup failed: {:#}", e);
                return Err(SubmissionError::TokenLookup(format!("{:#}", e)));
            }
        };

        let request = CreateQuestionaryRequest::from_questionary(&snapshot, submitted_at);

        if let Err(e) = self.transport.create(&request, &token).await {
            error!("Failed to create questionnaire {}: {}", snapshot.id, e);
            return Err(SubmissionError::Transport(e));
        }

        info!(
            "Questionnaire {} created with {} questions",
            snapshot.id,
            snapshot.questions.len()
        );
        Ok(SubmissionReceipt {
            questionary_id: snapshot.id,
            title: snapshot.title.clone(),
            question_count: snapshot.questions.len(),
            submitted_at,
        })
    }
}
