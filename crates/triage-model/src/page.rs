//! One batch of records from the listing endpoint.

use serde::{Deserialize, Serialize};

use crate::record::RawRecord;

/// Continuation metadata as declared by the server.
///
/// Only `has_next` drives the retrieval loop; it is `false` whenever the
/// server omits it so a malformed envelope can never paginate forever.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,
}

/// A decoded page: the records in server order plus continuation metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number that was requested.
    pub number: u32,
    pub records: Vec<RawRecord>,
    pub pagination: Pagination,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.pagination.has_next
    }
}
