//! Guardian content search: URL building, HTTP fetch, response types.

mod client;
mod query;
mod types;

pub use client::GuardianClient;
pub use query::{build_query_url, redacted};
pub use types::{ContentItem, SearchEnvelope, SearchResponse, Tag};
