//! Guardian content API HTTP client. One GET per load, whole body read into memory.

use reqwest::Client;
use url::Url;

use crate::api::query::{build_query_url, redacted};
use crate::config::AppConfig;
use crate::error::{NewsTuiError, Result};

const USER_AGENT: &str = concat!("newstui/", env!("CARGO_PKG_VERSION"));

/// Longest error text carried into the UI; the full body goes to the log.
const MAX_ERROR_MESSAGE_CHARS: usize = 120;

/// Client bound to one fully-built search URL.
pub struct GuardianClient {
    url: Url,
    client: Client,
}

impl GuardianClient {
    /// Fails here, not at fetch time, when the endpoint is malformed.
    pub fn new(config: &AppConfig, api_key: &str) -> Result<Self> {
        let url = build_query_url(config, api_key)?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Endpoint host and port, for the connectivity probe.
    pub fn host_and_port(&self) -> Option<(String, u16)> {
        let host = self.url.host_str()?.to_string();
        let port = self.url.port_or_known_default()?;
        Some((host, port))
    }

    /// GET the search URL and return the raw body.
    pub async fn fetch_body(&self) -> Result<String> {
        tracing::info!(url = %redacted(&self.url), "fetching articles");
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %text, "error response");
            return Err(NewsTuiError::Api {
                status: status.as_u16(),
                message: summarize_error_body(&text),
            });
        }
        let body = response.text().await?;
        if body.is_empty() {
            return Err(NewsTuiError::Fetch("empty response body".into()));
        }
        tracing::debug!(bytes = body.len(), "response received");
        Ok(body)
    }
}

/// One short line for an error body: the API's own `message` when the body is
/// its JSON error envelope, otherwise the first non-blank line, capped.
fn summarize_error_body(body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/response/message")
                .or_else(|| v.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });
    let line = from_json.unwrap_or_else(|| {
        body.lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string()
    });
    if line.chars().count() > MAX_ERROR_MESSAGE_CHARS {
        let cut: String = line.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
        format!("{cut}…")
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let c = GuardianClient::new(&AppConfig::default(), "test").unwrap();
        assert_eq!(c.url().host_str(), Some("content.guardianapis.com"));
        assert_eq!(
            c.host_and_port(),
            Some(("content.guardianapis.com".to_string(), 443))
        );
    }

    #[test]
    fn client_rejects_malformed_endpoint() {
        let config = AppConfig {
            endpoint: "::not-a-url".into(),
            ..AppConfig::default()
        };
        assert!(GuardianClient::new(&config, "test").is_err());
    }

    #[test]
    fn error_body_prefers_api_message() {
        let body = r#"{"response":{"status":"error","message":"Invalid authentication credentials"}}"#;
        assert_eq!(
            summarize_error_body(body),
            "Invalid authentication credentials"
        );
    }

    #[test]
    fn error_body_is_one_capped_line() {
        let page = format!("\n  <html>{}</html>\n<body>second</body>", "x".repeat(500));
        let summary = summarize_error_body(&page);
        assert!(!summary.contains('\n'));
        assert!(!summary.contains("second"));
        assert_eq!(summary.chars().count(), MAX_ERROR_MESSAGE_CHARS + 1);
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn short_error_body_is_kept() {
        assert_eq!(summarize_error_body("invalid key"), "invalid key");
        assert_eq!(summarize_error_body(""), "");
    }

    #[test]
    fn user_agent_carries_version() {
        assert!(USER_AGENT.starts_with("newstui/"));
    }
}
