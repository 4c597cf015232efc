//! Library components of the `triage` command-line tool.

pub mod logging;
pub mod pipeline;
