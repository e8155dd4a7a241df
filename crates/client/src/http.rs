//! HTTP adapter for the Dr WISE backend API.
//!
//! A thin layer over `reqwest`: joins endpoint paths onto the configured
//! base URL, attaches the persisted bearer token when one is stored, and
//! maps non-success statuses to [`ApiError::Status`]. Everything else
//! (decoding, retries, caching) is left to callers; resource wrappers in
//! [`crate::api`] decode, nobody retries or caches.

use std::sync::Arc;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::storage::{StorageError, TokenStore};

/// Max response-body length echoed into logs and error messages.
const BODY_SNIPPET_LEN: usize = 500;

/// Errors that can occur when talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Failed to decode a response body.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path did not resolve against the base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Persisted token could not be read.
    #[error("Token store error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Whether this error is an HTTP 401 from the backend.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the Dr WISE backend API.
///
/// Cheap to clone; all clones share one connection pool and one token
/// store. Every request reads the store so a token persisted by login is
/// picked up immediately and a token deleted by logout is never re-sent.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    token_store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_base_url.clone(),
                token_store,
            }),
        })
    }

    /// The token store this client reads the bearer token from.
    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.inner.token_store)
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Build a request with the bearer token attached when one is stored.
    async fn authorized(
        &self,
        method: Method,
        url: Url,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut builder = self.inner.client.request(method, url);
        if let Some(token) = self.inner.token_store.get().await? {
            builder = builder.bearer_auth(token.expose_secret());
        }
        Ok(builder)
    }

    /// Send a request and decode a JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(builder).await?;
        serde_json::from_str(&body).map_err(ApiError::Parse)
    }

    /// Send a request, check the status, and return the raw body.
    async fn execute_raw(&self, builder: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        // Body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                status = %status,
                body = %body.chars().take(BODY_SNIPPET_LEN).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        debug!(status = %status, "API request succeeded");
        Ok(body)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.authorized(Method::GET, url).await?;
        self.execute(builder).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().extend_pairs(query);
        let builder = self.authorized(Method::GET, url).await?;
        self.execute(builder).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let builder = self.authorized(Method::POST, url).await?.json(body);
        self.execute(builder).await
    }

    /// POST where the response body carries nothing the client needs.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let builder = self.authorized(Method::POST, url).await?.json(body);
        self.execute_raw(builder).await.map(|_| ())
    }

    /// POST a multipart form (document and photo uploads).
    pub(crate) async fn post_multipart_unit(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let builder = self.authorized(Method::POST, url).await?.multipart(form);
        self.execute_raw(builder).await.map(|_| ())
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let builder = self.authorized(Method::PUT, url).await?.json(body);
        self.execute(builder).await
    }
}

/// Extract a human-readable message from an error response body.
///
/// The backend sends `{ "message": "..." }` on errors; fall back to a
/// body prefix when it does not.
fn error_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map_or_else(|_| body.chars().take(200).collect(), |parsed| parsed.message)
}
