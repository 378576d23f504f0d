//! Opening article links outside the terminal.

use crate::error::{NewsTuiError, Result};

pub trait UrlOpener: Send {
    fn open(&self, url: &str) -> Result<()>;
}

/// Hands the URL to the desktop's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        tracing::info!(url, "opening in browser");
        webbrowser::open(url).map_err(NewsTuiError::Io)
    }
}
