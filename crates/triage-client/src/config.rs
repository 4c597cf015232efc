//! Endpoint and paging configuration.
//!
//! All values are fixed at startup and read-only for the duration of a run.

use std::fmt;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default patient listing endpoint.
pub const DEFAULT_BASE_URL: &str = "https://assessment.ksensetech.com/api/patients";

/// Default cohort submission endpoint.
pub const DEFAULT_SUBMIT_URL: &str = "https://assessment.ksensetech.com/api/submit-assessment";

/// Records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Pause after every page to stay under the service rate limit.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Upper bound on pages fetched in one run.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where to connect and how to authenticate.
#[derive(Clone)]
pub struct ClientConfig {
    /// Patient listing endpoint.
    pub base_url: String,
    /// Cohort submission endpoint.
    pub submit_url: String,
    /// Value of the `x-api-key` header.
    pub api_key: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            submit_url: DEFAULT_SUBMIT_URL.to_string(),
            api_key: api_key.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_submit_url(mut self, url: impl Into<String>) -> Self {
        self.submit_url = url.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("submit_url", &self.submit_url)
            .field("api_key", &"[REDACTED]")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// How the retriever walks the listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalOptions {
    /// Records requested per page.
    pub page_size: u32,
    /// Pause after every page, including the last.
    pub page_delay: Duration,
    /// Abort once more than this many pages would be requested.
    pub max_pages: u32,
    /// Per-page retry behavior.
    pub retry: RetryPolicy,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            max_pages: DEFAULT_MAX_PAGES,
            retry: RetryPolicy::default(),
        }
    }
}

impl RetrievalOptions {
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}
