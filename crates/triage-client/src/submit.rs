//! Hand-off of the finished cohort lists.

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, info};

use triage_model::{Cohort, CohortResult};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{build_client, parse_url, read_success_body};

/// Posts a [`CohortResult`] to the submission endpoint.
///
/// Submission is attempted once: a repeated POST could be counted twice by the
/// receiving service.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: Client,
    url: Url,
}

impl SubmissionClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            url: parse_url(&config.submit_url)?,
        })
    }

    /// Submit the cohorts and return the service acknowledgment.
    ///
    /// The acknowledgment is opaque; a non-JSON body is returned as a string.
    pub fn submit(&self, result: &CohortResult) -> Result<Value> {
        info!(
            url = %self.url,
            high_risk = result.ids(Cohort::HighRisk).len(),
            fever = result.ids(Cohort::Fever).len(),
            data_quality_issues = result.ids(Cohort::DataQuality).len(),
            "submitting cohorts"
        );
        let response = self.client.post(self.url.clone()).json(result).send()?;
        let body = read_success_body(response)?;
        debug!(bytes = body.len(), "submission acknowledged");
        Ok(parse_acknowledgment(&body))
    }
}

fn parse_acknowledgment(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
