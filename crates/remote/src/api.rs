//! HTTP client for the character list endpoint, built on [`reqwest`].

use std::time::Duration;

use crate::models::CharacterPage;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com";

/// Resource path of the character list, relative to the base URL.
pub const CHARACTERS_PATH: &str = "api/character";

/// HTTP client for the character API.
#[derive(Debug, Clone)]
pub struct CharacterApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the character API layer.
///
/// All variants are the same failure from the app's point of view (the
/// list could not be loaded); they are kept apart for logging.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Character API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not a valid character page.
    #[error("Malformed character payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RemoteError::Request(e) if e.is_timeout())
    }
}

impl CharacterApi {
    /// Create a client for the API at `base_url`, e.g.
    /// `https://rickandmortyapi.com`. Trailing slashes are ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Create a client whose requests fail after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the character list.
    pub fn characters_url(&self) -> String {
        format!("{}/{}", self.base_url, CHARACTERS_PATH)
    }

    /// Fetch the first page of characters.
    ///
    /// Sends `GET /api/character` without query parameters. Each call hits
    /// the network.
    pub async fn fetch_characters(&self) -> Result<CharacterPage, RemoteError> {
        let url = self.characters_url();
        tracing::debug!(url = %url, "Fetching characters");

        let response = self.client.get(&url).send().await?;
        let page: CharacterPage = Self::parse_response(response).await?;

        tracing::debug!(count = page.results.len(), "Characters fetched");
        Ok(page)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`RemoteError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Decode a successful JSON body. Transport errors while reading the
    /// body stay [`RemoteError::Request`]; bad JSON is [`RemoteError::Decode`].
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RemoteError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
