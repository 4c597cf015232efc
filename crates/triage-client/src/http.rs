//! Shared blocking HTTP plumbing: client construction, URL building and
//! response status handling.

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 2;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("patient-triage/", env!("CARGO_PKG_VERSION"));

/// Build a blocking client that sends the API key and honors the timeout.
pub fn build_client(config: &ClientConfig) -> Result<Client> {
    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|_| ClientError::Config("API key is not a valid header value".to_string()))?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))
}

/// Parse an endpoint URL, reporting the offending value on failure.
pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| ClientError::Config(format!("invalid URL {url:?}: {e}")))
}

/// `<base>?page=<n>&limit=<k>`, keeping any query the base already has.
pub fn page_url(base: &Url, page: u32, limit: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string());
    url
}

/// Check the status and return the body text of a successful response.
pub fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let url = response.url().to_string();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return Err(ClientError::RateLimited { retry_after });
    }

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ClientError::status(status.as_u16(), url, &body));
    }

    Ok(response.text()?)
}
