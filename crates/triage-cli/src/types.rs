use serde_json::Value;

use triage_core::Analysis;

#[derive(Debug)]
pub struct RunResult {
    pub analysis: Analysis,
    pub source: RunSource,
    /// Service acknowledgment, absent when nothing was submitted.
    pub acknowledgment: Option<Value>,
}

#[derive(Debug)]
pub enum RunSource {
    Service { pages: u32, requests: u32 },
    File(String),
}
