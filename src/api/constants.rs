//! Questionnaire backend endpoints and headers

/// Endpoint that creates a questionnaire from the submitted document
pub const CREATE_QUESTIONARY_ENDPOINT: &str = "questionary/create";

/// Endpoint returning aggregate response statistics for a date range
pub const STATISTICS_ENDPOINT: &str = "statistics";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("questionary-cli/", env!("CARGO_PKG_VERSION"));

/// Join the configured base URL and an endpoint path
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_normalizes_slashes() {
        assert_eq!(
            endpoint_url("https://api.example.com/", "/questionary/create"),
            "https://api.example.com/questionary/create"
        );
        assert_eq!(
            endpoint_url("http://localhost:8080", STATISTICS_ENDPOINT),
            "http://localhost:8080/statistics"
        );
    }
}
