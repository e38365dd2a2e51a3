//! Submission through fake token sources and transports

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use questionary_cli::api::{
    CreateQuestionaryRequest, MISSING_TOKEN_MESSAGE, QuestionaryTransport, SUBMISSION_FAILED_MESSAGE,
    SubmissionError, Submitter, TransportError, TransportFailure,
};
use questionary_cli::auth::TokenSource;
use questionary_cli::form::{FormAction, HistoryState, reduce};
use questionary_cli::model::{DraftDefaults, Questionary};
use std::sync::{Arc, Mutex};

struct FixedToken(Option<&'static str>);

impl TokenSource for FixedToken {
    fn token(&self) -> anyhow::Result<Option<String>> {
        Ok(self.0.map(str::to_string))
    }

    fn describe(&self) -> String {
        "fixed token".to_string()
    }
}

/// Records every request and answers with a canned result
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<(CreateQuestionaryRequest, String)>>,
    failure: Option<TransportError>,
}

impl RecordingTransport {
    fn failing(kind: TransportFailure) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(TransportError::new(kind, "boom")),
        }
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl QuestionaryTransport for RecordingTransport {
    async fn create(&self, request: &CreateQuestionaryRequest, token: &str) -> Result<(), TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), token.to_string()));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn edited_history() -> HistoryState {
    let doc = Questionary::untitled(
        Utc.with_ymd_and_hms(2024, 10, 7, 8, 0, 0).unwrap(),
        DraftDefaults::default(),
    );
    let state = reduce(HistoryState::new(doc), &FormAction::SetTitle("Onboarding".to_string()));
    reduce(state, &FormAction::AddQuestion)
}

#[tokio::test]
async fn test_missing_token_never_reaches_transport() {
    let transport = Arc::new(RecordingTransport::default());
    let submitter = Submitter::new(Arc::new(FixedToken(None)), transport.clone());

    let result = submitter.submit(edited_history().snapshot()).await;

    let error = result.unwrap_err();
    assert_eq!(error, SubmissionError::MissingToken);
    assert_eq!(error.user_message(), MISSING_TOKEN_MESSAGE);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_successful_submission_sends_snapshot_with_bearer_token() {
    let transport = Arc::new(RecordingTransport::default());
    let submitter = Submitter::new(Arc::new(FixedToken(Some("secret"))), transport.clone());
    let history = edited_history();
    let submitted_at = Utc.with_ymd_and_hms(2024, 10, 7, 9, 30, 0).unwrap();

    let receipt = submitter
        .submit_at(history.snapshot(), submitted_at)
        .await
        .unwrap();

    assert_eq!(receipt.title, "Onboarding");
    assert_eq!(receipt.question_count, 2);
    assert_eq!(receipt.submitted_at, submitted_at);

    let requests = transport.requests.lock().unwrap();
    let (request, token) = &requests[0];
    assert_eq!(token, "secret");
    assert_eq!(request.id, history.present().id);
    assert_eq!(request.created_at, submitted_at);
    assert_eq!(request.questions.len(), 2);
}

#[tokio::test]
async fn test_transport_failure_leaves_history_untouched() {
    let transport = Arc::new(RecordingTransport::failing(TransportFailure::ServerError(503)));
    let submitter = Submitter::new(Arc::new(FixedToken(Some("secret"))), transport.clone());
    let history = edited_history();
    let before = history.clone();

    let error = submitter.submit(history.snapshot()).await.unwrap_err();

    assert!(matches!(
        &error,
        SubmissionError::Transport(e) if e.kind == TransportFailure::ServerError(503)
    ));
    assert_eq!(error.user_message(), SUBMISSION_FAILED_MESSAGE);
    assert_eq!(transport.calls(), 1);
    assert_eq!(history, before);
    assert_eq!(history.past_len(), 2);
}

#[tokio::test]
async fn test_editing_continues_while_submission_is_in_flight() {
    let transport = Arc::new(RecordingTransport::default());
    let submitter = Submitter::new(Arc::new(FixedToken(Some("secret"))), transport.clone());
    let history = edited_history();

    let pending = tokio::spawn({
        let submitter = submitter.clone();
        let snapshot = history.snapshot();
        async move { submitter.submit(snapshot).await }
    });
    let history = reduce(history, &FormAction::AddQuestion);

    let receipt = pending.await.unwrap().unwrap();
    assert_eq!(receipt.question_count, 2);
    assert_eq!(history.present().questions.len(), 3);
}

#[test]
fn test_status_codes_are_classified() {
    assert_eq!(TransportFailure::from_status_code(401), TransportFailure::AuthError);
    assert_eq!(TransportFailure::from_status_code(404), TransportFailure::ClientError(404));
    assert_eq!(TransportFailure::from_status_code(500), TransportFailure::ServerError(500));
    assert_eq!(TransportFailure::from_status_code(302), TransportFailure::Unknown);
}
