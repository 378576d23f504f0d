//! Search URL construction.

use url::Url;

use crate::config::AppConfig;
use crate::error::{NewsTuiError, Result};

/// Builds the search URL. Parameter order is fixed so the same config and key
/// always give the same string.
pub fn build_query_url(config: &AppConfig, api_key: &str) -> Result<Url> {
    let mut url = Url::parse(&config.endpoint)
        .map_err(|e| NewsTuiError::Config(format!("Invalid endpoint URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(NewsTuiError::Config(format!(
            "Endpoint is not a base URL: {}",
            config.endpoint
        )));
    }
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("q", &config.query)
            .append_pair("from-date", &config.from_date)
            .append_pair("api-key", api_key)
            .append_pair("show-tags", &config.show_tags);
        if let Some(tag) = config.tag.as_deref().filter(|t| !t.is_empty()) {
            pairs.append_pair("tag", tag);
        }
    }
    Ok(url)
}

/// Same URL with the api-key value masked, for logs.
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api-key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_exact_url() {
        let url = build_query_url(&AppConfig::default(), "test").unwrap();
        assert_eq!(
            url.as_str(),
            "https://content.guardianapis.com/search?q=debate&from-date=2014-01-01&api-key=test&show-tags=contributor"
        );
    }

    #[test]
    fn builder_is_deterministic() {
        let config = AppConfig::default();
        let a = build_query_url(&config, "k").unwrap();
        let b = build_query_url(&config, "k").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn tag_is_appended_last_and_encoded() {
        let config = AppConfig {
            tag: Some("politics/politics".into()),
            ..AppConfig::default()
        };
        let url = build_query_url(&config, "test").unwrap();
        assert!(url
            .as_str()
            .ends_with("&show-tags=contributor&tag=politics%2Fpolitics"));
    }

    #[test]
    fn query_terms_are_form_encoded() {
        let config = AppConfig {
            query: "brexit & trade".into(),
            ..AppConfig::default()
        };
        let url = build_query_url(&config, "test").unwrap();
        assert!(url.as_str().contains("q=brexit+%26+trade&"));
    }

    #[test]
    fn malformed_endpoint_is_config_error() {
        let config = AppConfig {
            endpoint: "content.guardianapis.com/search".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            build_query_url(&config, "test"),
            Err(NewsTuiError::Config(_))
        ));
    }

    #[test]
    fn redacted_hides_key_only() {
        let url = build_query_url(&AppConfig::default(), "s3cret").unwrap();
        let shown = redacted(&url);
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("api-key=***"));
        assert!(shown.contains("q=debate"));
    }
}
