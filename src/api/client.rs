use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;

use crate::config::ApiSettings;

use super::constants::{CREATE_QUESTIONARY_ENDPOINT, STATISTICS_ENDPOINT, USER_AGENT, endpoint_url};
use super::error::{TransportError, TransportFailure};
use super::models::CreateQuestionaryRequest;
use super::statistics::{DateRange, StatisticsSource, StatisticsSummary};

/// Sends finished questionnaires to the backend
#[async_trait]
pub trait QuestionaryTransport: Send + Sync {
    async fn create(&self, request: &CreateQuestionaryRequest, token: &str) -> Result<(), TransportError>;
}

/// HTTP client for the questionnaire backend with connection pooling
#[derive(Clone)]
pub struct QuestionaryClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl QuestionaryClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_custom_client(settings.base_url.clone(), http_client))
    }

    /// Create a client around an existing reqwest client
    pub fn with_custom_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-success response into a classified error, keeping the body for the log
    async fn error_from_response(response: reqwest::Response) -> TransportError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!("Backend responded {}: {}", status, body);
        TransportError::new(
            TransportFailure::from_status_code(status.as_u16()),
            format!("HTTP {} {}", status.as_u16(), body.trim()),
        )
    }
}

#[async_trait]
impl QuestionaryTransport for QuestionaryClient {
    async fn create(&self, request: &CreateQuestionaryRequest, token: &str) -> Result<(), TransportError> {
        let url = endpoint_url(&self.base_url, CREATE_QUESTIONARY_ENDPOINT);
        info!("Submitting questionnaire {} to {}", request.id, url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        debug!("Create request status: {}", response.status());

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}

#[async_trait]
impl StatisticsSource for QuestionaryClient {
    async fn statistics(&self, range: DateRange, token: &str) -> Result<StatisticsSummary, TransportError> {
        let url = endpoint_url(&self.base_url, STATISTICS_ENDPOINT);
        debug!("Fetching statistics {} .. {} from {}", range.from, range.to, url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(&range.query_params())
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<StatisticsSummary>()
            .await
            .map_err(|e| TransportError::new(TransportFailure::Unknown, format!("Invalid statistics response: {}", e)))
    }
}
