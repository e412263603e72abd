//! Pinecone client connection management.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use super::PineconeConfig;
use crate::TRACING_TARGET_CLIENT;
use crate::error::{Error, Result};

/// Header carrying the API key.
const API_KEY_HEADER: HeaderName = HeaderName::from_static("api-key");

/// Header selecting the API version.
const API_VERSION_HEADER: HeaderName =
    HeaderName::from_static("x-pinecone-api-version");

/// Inner client that owns the HTTP session and configuration.
struct PineconeClientInner {
    http: Client,
    config: PineconeConfig,
    base_url: Url,
}

impl Drop for PineconeClientInner {
    fn drop(&mut self) {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = %self.base_url,
            "Releasing Pinecone HTTP session"
        );
    }
}

/// Asynchronous client for the Pinecone control plane.
///
/// The client owns one HTTP session (a connection pool) for its whole
/// lifetime. Clones are cheap handles to the same session; the session is
/// released when the last handle is dropped, whichever way the owning scope
/// is left. [`PineconeClient::close`] makes that release point explicit.
///
/// # Examples
///
/// ```rust,no_run
/// use nvisy_pinecone::{Metric, PineconeClient, ServerlessSpec};
///
/// # async fn example() -> nvisy_pinecone::Result<()> {
/// let client = PineconeClient::from_api_key("pcsk_example")?;
///
/// let index = client
///     .create_index("documents", 1536, Metric::Cosine, ServerlessSpec::new("aws", "us-east-1"))
///     .await?;
/// println!("created {} on {}", index.name, index.host);
///
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PineconeClient {
    inner: Arc<PineconeClientInner>,
}

impl PineconeClient {
    /// Creates a new client and opens its HTTP session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL cannot be parsed, the API key
    /// is not a valid header value, or the HTTP client cannot be created.
    pub fn new(config: PineconeConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = config.base_url(),
            timeout_ms = config.timeout().as_millis(),
            api_version = config.api_version(),
            "Creating Pinecone client"
        );

        let base_url = Url::parse(config.base_url())
            .map_err(|e| Error::config(format!("invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config("base URL cannot be used as a base"));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .default_headers(default_headers(&config)?)
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {e}")))?;

        let inner = PineconeClientInner {
            http,
            config,
            base_url,
        };

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            "Pinecone client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new client from an API key with default configuration.
    pub fn from_api_key(api_key: impl Into<String>) -> Result<Self> {
        let config = PineconeConfig::builder().with_api_key(api_key).build()?;
        Self::new(config)
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &PineconeConfig {
        &self.inner.config
    }

    /// Releases this handle to the HTTP session.
    ///
    /// The session itself closes once every clone has been closed or dropped.
    pub fn close(self) {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            handles = Arc::strong_count(&self.inner),
            "Closing Pinecone client"
        );
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Builds a control plane URL from path segments.
    ///
    /// Segments are percent-encoded, so index names can never escape their
    /// path position.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config("base URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl fmt::Debug for PineconeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Headers sent with every request.
fn default_headers(config: &PineconeConfig) -> Result<HeaderMap> {
    let mut api_key = HeaderValue::from_str(config.api_key())
        .map_err(|_| Error::config("API key contains characters not allowed in a header"))?;
    api_key.set_sensitive(true);

    let api_version = HeaderValue::from_str(config.api_version())
        .map_err(|_| Error::config("API version contains characters not allowed in a header"))?;

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(API_VERSION_HEADER, api_version);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}
