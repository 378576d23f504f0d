//! Application error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsTuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP/client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl NewsTuiError {
    /// The response arrived but could not be turned into articles.
    /// Everything else that ends a load is a fetch failure.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, NewsTuiError>;
