//! Where listing pages come from.

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{build_client, page_url, parse_url, read_success_body};

/// A source of raw listing responses.
///
/// The retriever owns pagination, retries and decoding; a source only performs
/// one request and returns the parsed JSON body.
pub trait PageSource {
    /// Fetch page `page` (1-based) holding up to `limit` records.
    fn fetch_page(&mut self, page: u32, limit: u32) -> Result<Value>;
}

impl<S: PageSource + ?Sized> PageSource for &mut S {
    fn fetch_page(&mut self, page: u32, limit: u32) -> Result<Value> {
        (**self).fetch_page(page, limit)
    }
}

/// Authenticated `GET <base>?page=<n>&limit=<k>` against the listing endpoint.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    base_url: Url,
}

impl HttpPageSource {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: parse_url(&config.base_url)?,
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(&mut self, page: u32, limit: u32) -> Result<Value> {
        let url = page_url(&self.base_url, page, limit);
        debug!(%url, "requesting page");
        let response = self.client.get(url).send()?;
        let body = read_success_body(response)?;
        Ok(serde_json::from_str(&body)?)
    }
}
