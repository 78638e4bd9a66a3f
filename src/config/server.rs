// Immutable server configuration
// Built once at startup and shared with every connection task

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use super::types::Settings;
use crate::error::StartupError;

/// Everything the accept loop and request handler need, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Absolute, canonical directory every served file must live under
    pub root: PathBuf,
    pub keep_alive: bool,
    pub header_read_timeout: Duration,
    pub connection_timeout: Duration,
}

impl ServerConfig {
    /// Combine loaded settings with the resolved root directory
    pub fn from_settings(settings: &Settings, root: PathBuf) -> Result<Self, StartupError> {
        let host = settings
            .server
            .host
            .parse::<IpAddr>()
            .map_err(|e| StartupError::InvalidHost(format!("{}: {e}", settings.server.host)))?;

        Ok(Self {
            host,
            port: settings.server.port,
            root,
            keep_alive: settings.performance.keep_alive,
            header_read_timeout: Duration::from_secs(settings.performance.header_read_timeout),
            connection_timeout: Duration::from_secs(settings.performance.connection_timeout),
        })
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
impl ServerConfig {
    /// Configuration for tests: loopback, ephemeral port, short timeouts
    pub fn for_root(root: PathBuf) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            root,
            keep_alive: false,
            header_read_timeout: Duration::from_secs(5),
            connection_timeout: Duration::from_secs(10),
        }
    }
}
