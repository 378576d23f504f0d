//! API key storage via the system credential store.
//! Keeps the key out of the config file and out of the binary.

use keyring::Entry;

use crate::error::{NewsTuiError, Result};

const SERVICE_NAME: &str = "newstui";

/// Environment variable that overrides the stored key for one run.
pub const API_KEY_ENV: &str = "GUARDIAN_API_KEY";

/// Public developer key accepted by the Guardian API with low rate limits.
pub const PLACEHOLDER_API_KEY: &str = "test";

/// Keyring account key for a given endpoint host.
fn account_key(endpoint_host: &str) -> String {
    format!("{endpoint_host}@api-key")
}

fn entry(endpoint_host: &str) -> Result<Entry> {
    Entry::new(SERVICE_NAME, &account_key(endpoint_host))
        .map_err(|e| NewsTuiError::Credential(e.to_string()))
}

/// Store the API key in the system keyring (encrypted at rest by the OS).
pub fn set_api_key(endpoint_host: &str, key: &str) -> Result<()> {
    entry(endpoint_host)?
        .set_password(key)
        .map_err(|e| NewsTuiError::Credential(e.to_string()))
}

/// Retrieve the API key from the keyring. Returns None if not stored.
pub fn get_api_key(endpoint_host: &str) -> Result<Option<String>> {
    match entry(endpoint_host)?.get_password() {
        Ok(k) => Ok(Some(k)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(NewsTuiError::Credential(e.to_string())),
    }
}

/// Remove the stored API key.
pub fn delete_api_key(endpoint_host: &str) -> Result<()> {
    entry(endpoint_host)?
        .delete_credential()
        .map_err(|e| NewsTuiError::Credential(e.to_string()))
}

/// Environment first, then keyring, then the placeholder key.
pub fn resolve_api_key(endpoint_host: &str) -> String {
    choose_api_key(std::env::var(API_KEY_ENV).ok(), || {
        get_api_key(endpoint_host)
    })
}

fn choose_api_key<F>(from_env: Option<String>, stored: F) -> String
where
    F: FnOnce() -> Result<Option<String>>,
{
    if let Some(k) = from_env.filter(|k| !k.trim().is_empty()) {
        tracing::debug!("using API key from {API_KEY_ENV}");
        return k.trim().to_string();
    }
    match stored() {
        Ok(Some(k)) if !k.is_empty() => {
            tracing::debug!("using API key from keyring");
            k
        }
        Ok(_) => {
            tracing::info!("no API key stored; using the public test key");
            PLACEHOLDER_API_KEY.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "keyring unavailable; using the public test key");
            PLACEHOLDER_API_KEY.to_string()
        }
    }
}
