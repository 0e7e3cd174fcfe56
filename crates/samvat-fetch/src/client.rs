//! Bearer-token HTTP client.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use samvat_types::Fetched;

use crate::url::BASE_URL;

/// Configuration for the API client.
///
/// Every outbound call carries these bounds; there is no retry or backoff.
/// A request that fails or times out degrades that pipeline stage to a
/// [`Fetched::Failed`] outcome and the run continues.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from the request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("samvat/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for the Upstox market-data API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    access_token: String,
}

impl ApiClient {
    /// Creates a new client with the given bearer token and configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(access_token: impl Into<String>, config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
            access_token: access_token.into(),
        })
    }

    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn with_defaults(access_token: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::new(access_token, ClientConfig::default())
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if a bearer token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Downloads a raw payload (e.g. an instrument dump) without
    /// authentication.
    ///
    /// Best-effort: any transport error or non-2xx status yields
    /// [`Fetched::Failed`].
    pub async fn download(&self, url: &str) -> Fetched<Bytes> {
        match self.http.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return Fetched::failed(format!("{url}: HTTP {status}"));
                }
                match response.bytes().await {
                    Ok(bytes) => Fetched::Data(bytes),
                    Err(e) => Fetched::failed(e),
                }
            }
            Err(e) => Fetched::failed(e),
        }
    }

    /// Performs an authenticated GET and returns the response body.
    ///
    /// Same best-effort semantics as [`Self::download`].
    pub(crate) async fn get_authenticated(&self, url: &str) -> Fetched<Bytes> {
        let request = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Accept", "application/json");

        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return Fetched::failed(format!("{url}: HTTP {status}"));
                }
                match response.bytes().await {
                    Ok(bytes) => Fetched::Data(bytes),
                    Err(e) => Fetched::failed(e),
                }
            }
            Err(e) => Fetched::failed(e),
        }
    }
}
