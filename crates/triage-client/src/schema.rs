//! Decoding listing responses.
//!
//! The service nests the record list under different field names depending on
//! the response. Each accepted shape is a [`SchemaAdapter`]; adapters are tried
//! in priority order and the first one whose field holds an array wins.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use triage_model::{Page, Pagination, RawRecord};

use crate::error::{ClientError, Result};

/// One accepted location of the record list inside a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaAdapter {
    /// Top-level field holding the record array.
    pub records_field: &'static str,
}

impl SchemaAdapter {
    pub const fn new(records_field: &'static str) -> Self {
        Self { records_field }
    }

    /// The record array, if this adapter recognizes the body.
    fn records<'a>(&self, body: &'a Value) -> Option<&'a Vec<Value>> {
        body.get(self.records_field).and_then(Value::as_array)
    }
}

/// Primary shape first, then the fallback.
pub const DEFAULT_ADAPTERS: [SchemaAdapter; 2] =
    [SchemaAdapter::new("data"), SchemaAdapter::new("patients")];

/// Decode one listing response into a [`Page`].
///
/// Fails with [`ClientError::Schema`] when no adapter matches or when an
/// individual record cannot be read (for example a missing `patient_id`).
pub fn decode_page(number: u32, body: &Value, adapters: &[SchemaAdapter]) -> Result<Page> {
    let Some((adapter, items)) = adapters
        .iter()
        .find_map(|adapter| adapter.records(body).map(|items| (adapter, items)))
    else {
        let expected: Vec<&str> = adapters.iter().map(|a| a.records_field).collect();
        return Err(ClientError::Schema {
            page: number,
            reason: format!("no record list under any of {expected:?}"),
        });
    };
    debug!(
        page = number,
        records_field = adapter.records_field,
        "response shape recognized"
    );

    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            RawRecord::deserialize(item).map_err(|err| ClientError::Schema {
                page: number,
                reason: format!("record {index}: {err}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Page {
        number,
        records,
        pagination: decode_pagination(body),
    })
}

/// Read continuation metadata field by field. A missing or non-boolean
/// `hasNext` means there are no further pages.
fn decode_pagination(body: &Value) -> Pagination {
    let Some(meta) = body.get("pagination") else {
        return Pagination::default();
    };
    let number = |field: &str| meta.get(field).and_then(Value::as_u64);
    Pagination {
        page: number("page"),
        limit: number("limit"),
        total: number("total"),
        total_pages: number("totalPages"),
        has_next: meta.get("hasNext").and_then(Value::as_bool).unwrap_or(false),
        has_previous: meta.get("hasPrevious").and_then(Value::as_bool),
    }
}
