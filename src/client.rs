//! Client for a platform's OpenAI-compatible HTTP API.
//!
//! Only construction lives here: the chat view opens a client for the chosen
//! platform so a session has credentials and an endpoint bound, but nothing
//! issues requests yet.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL {url:?}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("API key contains characters that cannot be sent in a header")]
    ApiKey,
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client bound to one platform endpoint and API key.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProviderClient {
    pub fn new(api_key: &str, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| ClientError::ApiKey)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        debug!(base_url = %base_url, "Built provider client");
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
