//! Aggregate response statistics for the dashboard

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TransportError;

/// Inclusive range of days to aggregate over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> anyhow::Result<Self> {
        if from > to {
            anyhow::bail!("Start date {} is after end date {}", from, to);
        }
        Ok(Self { from, to })
    }

    /// The week starting at `today`, the dashboard's default range
    pub fn week_from(today: NaiveDate) -> Self {
        Self {
            from: today,
            to: today + Duration::days(7),
        }
    }

    /// Query parameters understood by the statistics endpoint
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("startDate", self.from.format("%Y-%m-%d").to_string()),
            ("endDate", self.to.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Aggregate counts over a date range. The series are passed through untouched
/// for whichever charting front end renders them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsSummary {
    pub total_responses: u64,
    pub total_questionnaires_active: u64,
    pub average_response_rate: f64,
    pub response_data: Vec<Value>,
    pub completion_rate_data: Vec<Value>,
    pub satisfaction_data: Vec<Value>,
}

/// Provider of aggregate statistics
#[async_trait]
pub trait StatisticsSource: Send + Sync {
    async fn statistics(&self, range: DateRange, token: &str) -> Result<StatisticsSummary, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_range_and_query_params() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
        let range = DateRange::week_from(today);
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());

        let params = range.query_params();
        assert_eq!(params[0], ("startDate", "2024-12-28".to_string()));
        assert_eq!(params[1], ("endDate", "2025-01-04".to_string()));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(DateRange::new(later, earlier).is_err());
        assert!(DateRange::new(earlier, later).is_ok());
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: StatisticsSummary =
            serde_json::from_str(r#"{"totalResponses": 12, "averageResponseRate": 0.5}"#).unwrap();
        assert_eq!(summary.total_responses, 12);
        assert_eq!(summary.total_questionnaires_active, 0);
        assert!(summary.response_data.is_empty());
    }
}
