//! Guardian content search response types (subset the reader consumes).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ContentItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub web_title: String,
    pub section_name: String,
    pub web_publication_date: String,
    pub web_url: String,
    /// Only present when the request asked for `show-tags`.
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub web_title: Option<String>,
}
