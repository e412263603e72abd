//! Pinecone client configuration.

use std::fmt;
use std::time::Duration;

use derive_builder::Builder;

/// Default values for configuration options.
mod defaults {
    /// Pinecone control plane base URL.
    pub const BASE_URL: &str = "https://api.pinecone.io";

    /// Default request timeout in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Value sent in the `X-Pinecone-API-Version` header.
    pub const API_VERSION: &str = "2024-07";

    /// Model used by rerank requests that do not name one.
    pub const RERANK_MODEL: &str = "cohere-rerank-3.5";
}

/// Validates the PineconeConfig before building.
fn validate_config(builder: &PineconeConfigBuilder) -> std::result::Result<(), String> {
    if let Some(api_key) = &builder.api_key
        && api_key.trim().is_empty()
    {
        return Err("API key cannot be empty".to_string());
    }

    if let Some(Some(base_url)) = &builder.base_url
        && !base_url.starts_with("http://")
        && !base_url.starts_with("https://")
    {
        return Err(format!(
            "Base URL must start with http:// or https://, got {}",
            base_url
        ));
    }

    if let Some(Some(timeout)) = builder.timeout
        && timeout.is_zero()
    {
        return Err("Request timeout must be greater than zero".to_string());
    }

    if let Some(Some(api_version)) = &builder.api_version
        && api_version.is_empty()
    {
        return Err("API version cannot be empty".to_string());
    }

    Ok(())
}

/// Configuration for [`PineconeClient`] connections.
///
/// The API key is the only required value; everything else falls back to
/// defaults suitable for the public Pinecone service. A configuration is
/// immutable once built.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use nvisy_pinecone::PineconeConfig;
///
/// let config = PineconeConfig::builder()
///     .with_api_key("pcsk_example")
///     .with_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url(), "https://api.pinecone.io");
/// ```
///
/// [`PineconeClient`]: crate::PineconeClient
#[derive(Clone, Builder)]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "validate_config")
)]
pub struct PineconeConfig {
    /// API key sent in the `Api-Key` header.
    api_key: String,

    /// Control plane base URL (default: `https://api.pinecone.io`)
    #[builder(default)]
    base_url: Option<String>,

    /// Timeout applied to every HTTP request (default: 30s)
    #[builder(default)]
    timeout: Option<Duration>,

    /// API version header value (default: `2024-07`)
    #[builder(default)]
    api_version: Option<String>,

    /// User-Agent header value
    #[builder(default)]
    user_agent: Option<String>,

    /// Default model for rerank requests
    #[builder(default)]
    rerank_model: Option<String>,
}

impl PineconeConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> PineconeConfigBuilder {
        PineconeConfigBuilder::default()
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the effective base URL (considering defaults).
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(defaults::BASE_URL)
    }

    /// Returns the effective request timeout (considering defaults).
    pub fn timeout(&self) -> Duration {
        self.timeout
            .unwrap_or_else(|| Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS))
    }

    /// Returns the effective API version (considering defaults).
    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(defaults::API_VERSION)
    }

    /// Returns the effective user agent (considering defaults).
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("nvisy-pinecone/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Returns the effective rerank model (considering defaults).
    pub fn rerank_model(&self) -> &str {
        self.rerank_model
            .as_deref()
            .unwrap_or(defaults::RERANK_MODEL)
    }

    /// Returns the API key with everything past the first four characters masked.
    pub(crate) fn masked_api_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(4).collect();
        format!("{prefix}****")
    }
}

impl fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout())
            .field("api_version", &self.api_version())
            .field("rerank_model", &self.rerank_model())
            .finish()
    }
}
