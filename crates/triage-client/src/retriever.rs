//! Sequential, rate-limited walk over the paginated listing.
//!
//! Pages are requested one at a time starting at page 1. After each page the
//! retriever sleeps for the configured delay (the last page included) and
//! continues only while the server declares `pagination.hasNext`. A failing
//! page is retried under the [`RetryPolicy`](crate::retry::RetryPolicy); once
//! the policy gives up the whole retrieval fails, so callers never see a
//! partial record set.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use triage_model::{Page, RawRecord};

use crate::config::RetrievalOptions;
use crate::error::{ClientError, Result};
use crate::schema::{DEFAULT_ADAPTERS, SchemaAdapter, decode_page};
use crate::source::PageSource;

/// Every record of a completed retrieval plus request accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    /// Records in page order, then server order within a page.
    pub records: Vec<RawRecord>,
    /// Pages successfully decoded.
    pub pages: u32,
    /// Requests issued, retries included.
    pub requests: u32,
}

/// Drives a [`PageSource`] until the listing is exhausted.
#[derive(Debug)]
pub struct Retriever<S> {
    source: S,
    options: RetrievalOptions,
    adapters: Vec<SchemaAdapter>,
}

impl<S: PageSource> Retriever<S> {
    pub fn new(source: S, options: RetrievalOptions) -> Self {
        Self {
            source,
            options,
            adapters: DEFAULT_ADAPTERS.to_vec(),
        }
    }

    /// Replace the accepted response shapes (tried in the given order).
    #[must_use]
    pub fn with_adapters(mut self, adapters: Vec<SchemaAdapter>) -> Self {
        self.adapters = adapters;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch every page and return all records in arrival order.
    pub fn fetch_all(&mut self) -> Result<Retrieval> {
        let start = Instant::now();
        let mut records = Vec::new();
        let mut requests = 0u32;
        let mut number = 1u32;

        loop {
            if number > self.options.max_pages {
                warn!(
                    max_pages = self.options.max_pages,
                    "server still declares more pages, aborting"
                );
                return Err(ClientError::PageLimitExceeded {
                    max_pages: self.options.max_pages,
                });
            }

            let page = self.fetch_page_with_retry(number, &mut requests)?;
            let has_next = page.has_next();
            info!(
                page = number,
                records = page.records.len(),
                has_next,
                "page retrieved"
            );
            records.extend(page.records);

            pause(self.options.page_delay);

            if !has_next {
                break;
            }
            number += 1;
        }

        info!(
            pages = number,
            records = records.len(),
            requests,
            duration_ms = start.elapsed().as_millis(),
            "retrieval complete"
        );
        Ok(Retrieval {
            records,
            pages: number,
            requests,
        })
    }

    fn fetch_page_with_retry(&mut self, number: u32, requests: &mut u32) -> Result<Page> {
        let policy = self.options.retry;
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            *requests += 1;
            let result = self
                .source
                .fetch_page(number, self.options.page_size)
                .and_then(|body| decode_page(number, &body, &self.adapters));

            let error = match result {
                Ok(page) => return Ok(page),
                Err(error) => error,
            };

            if !policy.should_retry(attempt, &error) {
                warn!(page = number, attempt, error = %error, "page request failed");
                return Err(if attempt > 1 || error.is_retryable() {
                    ClientError::RetriesExhausted {
                        page: number,
                        attempts: attempt,
                        last: Box::new(error),
                    }
                } else {
                    error
                });
            }

            let delay = policy.delay_for(attempt, &error);
            warn!(
                page = number,
                attempt,
                max_attempts = policy.attempts(),
                delay_ms = delay.as_millis(),
                error = %error,
                "page request failed, retrying"
            );
            pause(delay);
        }
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        debug!(delay_ms = duration.as_millis(), "waiting");
        thread::sleep(duration);
    }
}
