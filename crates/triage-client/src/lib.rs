//! Client for the patient listing and cohort submission endpoints.
//!
//! # Retrieval
//!
//! [`Retriever`] walks the paginated listing through a [`PageSource`]
//! ([`HttpPageSource`] in production), decoding each body with the ordered
//! [`SchemaAdapter`] list and retrying transient failures under a
//! [`RetryPolicy`]. Retrieval either returns every record or fails.
//!
//! # Submission
//!
//! [`SubmissionClient`] posts the finished cohort lists and returns the
//! service acknowledgment untouched.

pub mod config;
pub mod error;
pub mod http;
pub mod retriever;
pub mod retry;
pub mod schema;
pub mod source;
pub mod submit;

pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY, DEFAULT_PAGE_SIZE,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_SUBMIT_URL, RetrievalOptions,
};
pub use error::{ClientError, Result};
pub use retriever::{Retrieval, Retriever};
pub use retry::RetryPolicy;
pub use schema::{DEFAULT_ADAPTERS, SchemaAdapter, decode_page};
pub use source::{HttpPageSource, PageSource};
pub use submit::SubmissionClient;
