//! Article records and the JSON-to-records mapping.

use crate::api::{ContentItem, SearchEnvelope};
use crate::error::{NewsTuiError, Result};

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

const DATE_LEN: usize = 10;

/// One row of the reader. Built once per fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub headline: String,
    pub section: String,
    pub author: String,
    /// `YYYY-MM-DD` prefix of the publication timestamp.
    pub date: String,
    pub url: String,
}

/// Records in response order; replaced wholesale on every fetch.
pub type ArticleList = Vec<ArticleRecord>;

/// Decode a search response body. Any bad item fails the whole batch.
pub fn parse_articles(body: &str) -> Result<ArticleList> {
    let envelope: SearchEnvelope =
        serde_json::from_str(body).map_err(|e| NewsTuiError::Parse(e.to_string()))?;
    envelope
        .response
        .results
        .into_iter()
        .enumerate()
        .map(|(i, item)| to_record(item).map_err(|e| at_index(i, e)))
        .collect()
}

fn at_index(i: usize, e: NewsTuiError) -> NewsTuiError {
    match e {
        NewsTuiError::Parse(msg) => NewsTuiError::Parse(format!("result {i}: {msg}")),
        other => other,
    }
}

fn to_record(item: ContentItem) -> Result<ArticleRecord> {
    let date = truncate_date(&item.web_publication_date)?;
    url::Url::parse(&item.web_url)
        .map_err(|e| NewsTuiError::Parse(format!("invalid webUrl {:?}: {e}", item.web_url)))?;
    let author = item
        .tags
        .as_deref()
        .and_then(|tags| tags.first())
        .and_then(|t| t.web_title.clone())
        .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());
    Ok(ArticleRecord {
        headline: item.web_title,
        section: item.section_name,
        author,
        date,
        url: item.web_url,
    })
}

/// First ten characters of an ISO-8601 timestamp.
pub fn truncate_date(timestamp: &str) -> Result<String> {
    match timestamp.char_indices().nth(DATE_LEN) {
        Some((end, _)) => Ok(timestamp[..end].to_string()),
        None if timestamp.chars().count() == DATE_LEN => Ok(timestamp.to_string()),
        None => Err(NewsTuiError::Parse(format!(
            "webPublicationDate {timestamp:?} is shorter than {DATE_LEN} characters"
        ))),
    }
}
