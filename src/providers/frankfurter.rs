use super::util::with_retry;
use crate::core::error::{RateError, Result};
use crate::core::rates::RateProvider;
use crate::core::snapshot::RateSnapshot;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize)]
struct LatestResponse {
    base: String,
    date: String,
    rates: HashMap<String, f64>,
}

/// Client for the Frankfurter daily reference rates API.
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("fxc/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            retries: 3,
            retry_delay_ms: 500,
        })
    }

    pub fn with_retry_policy(mut self, retries: usize, retry_delay_ms: u64) -> Self {
        self.retries = retries;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    fn latest_url(&self) -> String {
        format!("{}/latest", self.base_url)
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_latest(&self) -> Result<RateSnapshot> {
        let url = self.latest_url();
        debug!("Requesting latest rates from {}", url);

        let fetch_error = |reason: String| RateError::Fetch {
            url: url.clone(),
            reason,
        };

        let response = with_retry(
            || self.client.get(&url).send(),
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP error: {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let data: LatestResponse = match serde_json::from_slice(&body) {
            Ok(data) => data,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %String::from_utf8_lossy(&body),
                    "Failed to parse rates response"
                );
                return Err(e.into());
            }
        };

        let date = NaiveDate::parse_from_str(&data.date, "%Y-%m-%d")
            .map_err(|e| RateError::Parse(format!("invalid date {:?}: {e}", data.date)))?;

        debug!(base = %data.base, %date, count = data.rates.len(), "Received rates");
        RateSnapshot::new(data.base, date, data.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Currency;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOCK_JSON: &str = r#"{
        "amount": 1.0,
        "base": "EUR",
        "date": "2024-05-10",
        "rates": {
            "AUD": 1.6285,
            "DKK": 7.4589,
            "USD": 1.0772
        }
    }"#;

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(server: &MockServer) -> FrankfurterProvider {
        FrankfurterProvider::new(&server.uri())
            .unwrap()
            .with_retry_policy(0, 1)
    }

    #[tokio::test]
    async fn test_fetch_latest() {
        let mock_server = create_mock_server(200, MOCK_JSON).await;

        let snapshot = provider(&mock_server).fetch_latest().await.unwrap();

        assert_eq!(snapshot.base(), "EUR");
        assert_eq!(snapshot.date(), NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(snapshot.rates().len(), 3);
        assert_eq!(snapshot.rate(Currency::Usd).unwrap(), 1.0772);
        assert_eq!(snapshot.rate(Currency::Eur).unwrap(), 1.0);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = create_mock_server(200, MOCK_JSON).await;
        let provider = FrankfurterProvider::new(&format!("{}/", mock_server.uri())).unwrap();

        assert!(provider.fetch_latest().await.is_ok());
    }

    #[tokio::test]
    async fn test_server_error_is_fetch_error() {
        let mock_server = create_mock_server(500, "").await;

        let err = provider(&mock_server).fetch_latest().await.unwrap_err();
        match err {
            RateError::Fetch { url, reason } => {
                assert_eq!(url, format!("{}/latest", mock_server.uri()));
                assert_eq!(reason, "HTTP error: 500 Internal Server Error");
            }
            other => panic!("Expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        // Nothing listens on the discard port
        let provider = FrankfurterProvider::new("http://127.0.0.1:9")
            .unwrap()
            .with_retry_policy(1, 1);

        let err = provider.fetch_latest().await.unwrap_err();
        assert!(matches!(err, RateError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_malformed_response_is_parse_error() {
        let mock_server = create_mock_server(200, r#"{"base": "EUR", "rates": "#).await;

        let err = provider(&mock_server).fetch_latest().await.unwrap_err();
        assert!(matches!(err, RateError::Parse(_)));
    }

    #[tokio::test]
    async fn test_bad_date_is_parse_error() {
        let body = r#"{"base": "EUR", "date": "10/05/2024", "rates": {"USD": 1.07}}"#;
        let mock_server = create_mock_server(200, body).await;

        let err = provider(&mock_server).fetch_latest().await.unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }
}
