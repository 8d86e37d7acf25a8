//! Network reachability, injected where it's needed
use std::{future::Future, pin::Pin, time::Duration};

use log::debug;
use tokio::{net::TcpStream, time::timeout};
use url::Url;

use crate::errors::GitScoutError;

/// Answers "can we reach the network right now?".
pub trait Connectivity: Sync + Send {
    /// Whether the network is currently reachable.
    fn is_network_available(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

/// Probes a host with a TCP connect.
#[derive(Debug, Clone)]
pub struct TcpConnectivity {
    /// Host to reach
    host: String,

    /// Port to reach
    port: u16,

    /// Give up after this long
    timeout: Duration,
}

impl TcpConnectivity {
    /// Probe the host serving `url`.
    /// # Errors
    /// Error if the URL has no host or no known port
    pub fn from_url(url: &Url, timeout: Duration) -> Result<Self, GitScoutError> {
        let host = url
            .host_str()
            .ok_or_else(|| GitScoutError::from(format!("No host in {url}")))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| GitScoutError::from(format!("No port for {url}")))?;
        Ok(Self {
            host: host.to_string(),
            port,
            timeout,
        })
    }
}

impl Connectivity for TcpConnectivity {
    fn is_network_available(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            let address = (self.host.as_str(), self.port);
            match timeout(self.timeout, TcpStream::connect(address)).await {
                Ok(Ok(_)) => true,
                Ok(Err(e)) => {
                    debug!("{}:{} unreachable: {e}", self.host, self.port);
                    false
                }
                Err(_) => {
                    debug!("{}:{} timed out", self.host, self.port);
                    false
                }
            }
        })
    }
}

/// Skips the check, for when probing is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeOnline;

impl Connectivity for AssumeOnline {
    fn is_network_available(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async { true })
    }
}
