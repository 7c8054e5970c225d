//! HTTP client for the BLS Public Data API.

use async_trait::async_trait;
use laborstat_types::{SeriesObservation, YearRange};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::url::{BASE_URL, timeseries_url};
use crate::wire::{TimeseriesRequest, parse_response};
use crate::{ApiTier, RetrieveError, SeriesClient};

/// Configuration for the BLS client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Registration key. Without one the public v1 tier and its limits apply.
    pub api_key: Option<String>,
    /// API root, overridable for mirrors and tests.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Ask the provider to include annual averages (`M13`).
    pub annual_average: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            user_agent: format!("laborstat/{}", env!("CARGO_PKG_VERSION")),
            annual_average: false,
        }
    }
}

impl ClientConfig {
    /// Sets the registration key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the access tier implied by the configured key.
    #[must_use]
    pub fn tier(&self) -> ApiTier {
        ApiTier::for_key(self.api_key.as_deref())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("base_delay_ms", &self.base_delay_ms)
            .field("max_delay_ms", &self.max_delay_ms)
            .field("user_agent", &self.user_agent)
            .field("annual_average", &self.annual_average)
            .finish()
    }
}

/// BLS client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct BlsClient {
    client: Client,
    config: ClientConfig,
    tier: ApiTier,
    url: String,
}

impl BlsClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        let tier = config.tier();
        let url = timeseries_url(&config.base_url, tier);
        Ok(Self {
            client,
            config,
            tier,
            url,
        })
    }

    /// Creates a client with default configuration (public tier).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the access tier this client uses.
    #[must_use]
    pub const fn tier(&self) -> ApiTier {
        self.tier
    }

    /// Posts one request for at most one tier's worth of series.
    async fn post_batch(
        &self,
        series_ids: &[String],
        range: YearRange,
    ) -> Result<Vec<SeriesObservation>, RetrieveError> {
        let request = TimeseriesRequest::new(
            series_ids,
            range,
            self.config.api_key.as_deref().filter(|_| self.tier == ApiTier::Registered),
            self.config.annual_average,
        );
        let mut attempts = 0;

        loop {
            tracing::debug!(
                url = %self.url,
                %range,
                series = series_ids.len(),
                attempt = attempts,
                "posting series request"
            );

            match self.client.post(&self.url).json(&request).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(RetrieveError::Auth(format!("HTTP {status}")));
                    }

                    // Retry on server errors (5xx) and rate limiting (429)
                    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tracing::warn!(%status, attempt = attempts, ?delay, "retrying series request");
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(if status == StatusCode::TOO_MANY_REQUESTS {
                            RetrieveError::RateLimit(format!("HTTP {status}"))
                        } else {
                            RetrieveError::Network(format!("server error: HTTP {status}"))
                        });
                    }

                    if !status.is_success() {
                        return Err(RetrieveError::Api(format!("HTTP {status}")));
                    }

                    let body = response
                        .text()
                        .await
                        .map_err(|e| RetrieveError::Network(e.to_string()))?;
                    return parse_response(&body, range, self.tier.max_years());
                }
                Err(e) if is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tracing::warn!(error = %e, attempt = attempts, ?delay, "retrying series request");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(RetrieveError::Network(e.to_string())),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_delay * 2^attempt
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));
        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter within ±25%, varying with the attempt number
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let offset = (u64::from(attempt) * 7919) % (jitter_range * 2 + 1);
            offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(0) as u64;
        Duration::from_millis(final_delay)
    }
}

/// Determines if a transport error is worth retrying.
fn is_retryable_error(error: &reqwest::Error) -> bool {
    // Don't retry builder errors (configuration issues)
    if error.is_builder() {
        return false;
    }
    error.is_timeout() || error.is_connect() || error.is_request()
}

#[async_trait]
impl SeriesClient for BlsClient {
    fn max_span(&self) -> u32 {
        self.tier.max_years()
    }

    async fn retrieve(
        &self,
        series_ids: &[String],
        range: YearRange,
    ) -> Result<Vec<SeriesObservation>, RetrieveError> {
        let max_span = self.max_span();
        if range.span() > max_span {
            return Err(RetrieveError::RangeTooLarge { range, max_span });
        }

        let mut observations = Vec::new();
        for batch in series_ids.chunks(self.tier.series_per_request()) {
            observations.extend(self.post_batch(batch, range).await?);
        }
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use laborstat_types::Period;

    fn success_body(series_id: &str, year: i32) -> serde_json::Value {
        serde_json::json!({
            "status": "REQUEST_SUCCEEDED",
            "responseTime": 42,
            "message": [],
            "Results": {"series": [{
                "seriesID": series_id,
                "data": [
                    {"year": year.to_string(), "period": "M02", "periodName": "February", "value": "3.8", "footnotes": [{}]},
                    {"year": year.to_string(), "period": "M01", "periodName": "January", "value": "4.0", "footnotes": [{}]}
                ]
            }]}
        })
    }

    fn test_config(server: &MockServer) -> ClientConfig {
        ClientConfig {
            base_delay_ms: 1,
            max_delay_ms: 5,
            ..ClientConfig::default()
        }
        .with_base_url(server.base_url())
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.tier(), ApiTier::Public);
        assert!(config.user_agent.starts_with("laborstat/"));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = ClientConfig::default().with_api_key("super-secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = BlsClient::with_defaults().unwrap();
        assert_eq!(client.tier(), ApiTier::Public);
        assert_eq!(client.max_span(), 10);
    }

    #[test]
    fn test_backoff_delay_calculation() {
        let client = BlsClient::with_defaults().unwrap();

        // First attempt: base_delay * 2 = 1000ms (plus jitter)
        let delay1 = client.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 750 && delay1.as_millis() <= 1250);

        // Second attempt: base_delay * 4 = 2000ms (plus jitter)
        let delay2 = client.calculate_backoff_delay(2);
        assert!(delay2.as_millis() >= 1500 && delay2.as_millis() <= 2500);

        // High attempt should be capped at max_delay
        let delay_high = client.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 12_500); // max_delay + 25% jitter
    }

    #[tokio::test]
    async fn test_retrieve_registered_sends_key() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2/timeseries/data/")
                    .body_includes("\"registrationkey\":\"k3y\"")
                    .body_includes("\"startyear\":\"2002\"")
                    .body_includes("\"endyear\":\"2021\"");
                then.status(200).json_body(success_body("LNS14000000", 2021));
            })
            .await;

        let client = BlsClient::new(test_config(&server).with_api_key("k3y")).unwrap();
        let ids = vec!["LNS14000000".to_string()];
        let range = YearRange::new(2002, 2021).unwrap();
        let observations = client.retrieve(&ids, range).await.unwrap();

        mock.assert_async().await;
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].period(), Period::Month(2));
    }

    #[tokio::test]
    async fn test_retrieve_rejects_wide_range_without_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(success_body("LNS14000000", 2021));
            })
            .await;

        let client = BlsClient::new(test_config(&server)).unwrap();
        let ids = vec!["LNS14000000".to_string()];
        let range = YearRange::new(2000, 2020).unwrap();
        let err = client.retrieve(&ids, range).await.unwrap_err();

        assert_eq!(err, RetrieveError::RangeTooLarge { range, max_span: 10 });
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_retrieve_splits_series_batches() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/timeseries/data/");
                then.status(200).json_body(success_body("LNS14000000", 2020));
            })
            .await;

        let client = BlsClient::new(test_config(&server)).unwrap();
        let ids: Vec<String> = (0..30).map(|i| format!("SERIES{i:02}")).collect();
        let range = YearRange::single_year(2020);
        let observations = client.retrieve(&ids, range).await.unwrap();

        // 30 series over a 25-series cap is two requests
        mock.assert_hits_async(2).await;
        assert_eq!(observations.len(), 4);
    }

    #[tokio::test]
    async fn test_retrieve_maps_rate_limit_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(serde_json::json!({
                    "status": "REQUEST_NOT_PROCESSED",
                    "message": ["The daily threshold for total number of requests allocated to the user has been reached."]
                }));
            })
            .await;

        let client = BlsClient::new(test_config(&server)).unwrap();
        let ids = vec!["LNS14000000".to_string()];
        let err = client
            .retrieve(&ids, YearRange::single_year(2020))
            .await
            .unwrap_err();
        assert!(matches!(err, RetrieveError::RateLimit(_)));
    }

    #[tokio::test]
    async fn test_retrieve_retries_then_reports_429() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429);
            })
            .await;

        let client = BlsClient::new(test_config(&server)).unwrap();
        let ids = vec!["LNS14000000".to_string()];
        let err = client
            .retrieve(&ids, YearRange::single_year(2020))
            .await
            .unwrap_err();

        assert!(matches!(err, RetrieveError::RateLimit(_)));
        mock.assert_hits_async(4).await; // first try + 3 retries
    }

    #[tokio::test]
    async fn test_retrieve_maps_forbidden_to_auth() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(403);
            })
            .await;

        let client = BlsClient::new(test_config(&server)).unwrap();
        let ids = vec!["LNS14000000".to_string()];
        let err = client
            .retrieve(&ids, YearRange::single_year(2020))
            .await
            .unwrap_err();

        assert!(matches!(err, RetrieveError::Auth(_)));
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_retrieve_server_error_is_network() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(503);
            })
            .await;

        let client = BlsClient::new(test_config(&server)).unwrap();
        let ids = vec!["LNS14000000".to_string()];
        let err = client
            .retrieve(&ids, YearRange::single_year(2020))
            .await
            .unwrap_err();
        assert!(matches!(err, RetrieveError::Network(_)));
    }
}
