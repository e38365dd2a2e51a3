//! Submission failures and their classification

use std::fmt;

/// What kind of transport failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// Network-level errors (connection refused, DNS, etc)
    Network,
    /// Request timed out
    Timeout,
    /// HTTP 401/403
    AuthError,
    /// Other 4xx responses
    ClientError(u16),
    /// HTTP 5xx server errors
    ServerError(u16),
    /// Anything else, e.g. an unreadable response body
    Unknown,
}

impl TransportFailure {
    /// Classify a non-success HTTP status code
    pub fn from_status_code(status: u16) -> Self {
        match status {
            401 | 403 => TransportFailure::AuthError,
            408 => TransportFailure::Timeout,
            400..=499 => TransportFailure::ClientError(status),
            500..=599 => TransportFailure::ServerError(status),
            _ => TransportFailure::Unknown,
        }
    }

    /// Classify a reqwest error
    pub fn from_reqwest_error(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportFailure::Timeout
        } else if error.is_connect() || error.is_request() {
            TransportFailure::Network
        } else if let Some(status) = error.status() {
            Self::from_status_code(status.as_u16())
        } else {
            TransportFailure::Unknown
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Network => write!(f, "network error"),
            TransportFailure::Timeout => write!(f, "request timed out"),
            TransportFailure::AuthError => write!(f, "authentication rejected"),
            TransportFailure::ClientError(status) => write!(f, "request rejected ({})", status),
            TransportFailure::ServerError(status) => write!(f, "server error ({})", status),
            TransportFailure::Unknown => write!(f, "unknown error"),
        }
    }
}

/// A failed request to the questionnaire backend
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError {
    pub kind: TransportFailure,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        Self::new(TransportFailure::from_reqwest_error(error), error.to_string())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {}

pub const MISSING_TOKEN_MESSAGE: &str = "Authentication token not found";
pub const SUBMISSION_FAILED_MESSAGE: &str = "An unexpected error occurred while creating the questionnaire";

/// Why a submission did not go through
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// No token available; nothing was sent
    MissingToken,
    /// The token source itself failed, e.g. an unreadable token file
    TokenLookup(String),
    /// The request was sent and failed
    Transport(TransportError),
}

impl SubmissionError {
    /// Text for the user-facing notification
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::MissingToken => MISSING_TOKEN_MESSAGE,
            SubmissionError::TokenLookup(_) | SubmissionError::Transport(_) => SUBMISSION_FAILED_MESSAGE,
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::MissingToken => write!(f, "{}", MISSING_TOKEN_MESSAGE),
            SubmissionError::TokenLookup(message) => write!(f, "Token lookup failed: {}", message),
            SubmissionError::Transport(error) => write!(f, "Submission failed: {}", error),
        }
    }
}

impl std::error::Error for SubmissionError {}

impl From<TransportError> for SubmissionError {
    fn from(error: TransportError) -> Self {
        SubmissionError::Transport(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(TransportFailure::from_status_code(401), TransportFailure::AuthError);
        assert_eq!(TransportFailure::from_status_code(403), TransportFailure::AuthError);
        assert_eq!(TransportFailure::from_status_code(408), TransportFailure::Timeout);
        assert_eq!(TransportFailure::from_status_code(422), TransportFailure::ClientError(422));
        assert_eq!(TransportFailure::from_status_code(503), TransportFailure::ServerError(503));
        assert_eq!(TransportFailure::from_status_code(302), TransportFailure::Unknown);
    }

    #[test]
    fn test_user_messages_hide_transport_details() {
        let error = SubmissionError::from(TransportError::new(TransportFailure::ServerError(500), "boom"));
        assert_eq!(error.user_message(), SUBMISSION_FAILED_MESSAGE);
        assert_eq!(SubmissionError::MissingToken.user_message(), MISSING_TOKEN_MESSAGE);
        assert!(error.to_string().contains("server error (500)"));
    }
}
