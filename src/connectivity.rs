//! Network reachability check run before each fetch.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[async_trait]
pub trait Connectivity: Send + Sync {
    async fn is_connected(&self) -> bool;
}

/// Reachable when a TCP connection to the API host can be opened.
/// The whole check (lookup plus connects) shares one timeout.
#[derive(Debug, Clone)]
pub struct SocketProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl SocketProbe {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: PROBE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn try_connect(&self) -> bool {
        let addrs = match lookup_host((self.host.as_str(), self.port)).await {
            Ok(a) => a,
            Err(e) => {
                tracing::info!(host = %self.host, error = %e, "host did not resolve");
                return false;
            }
        };
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(_) => return true,
                Err(e) => tracing::debug!(%addr, error = %e, "connect failed"),
            }
        }
        false
    }
}

#[async_trait]
impl Connectivity for SocketProbe {
    async fn is_connected(&self) -> bool {
        timeout(self.timeout, self.try_connect())
            .await
            .unwrap_or_else(|_| {
                tracing::info!(host = %self.host, "connectivity check timed out");
                false
            })
    }
}
