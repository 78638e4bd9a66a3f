//! Error types
//!
//! Fatal startup errors. Per-request failures never surface here: the
//! request handler turns them into status responses.

use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Errors that abort the process before the accept loop starts
#[derive(Debug)]
pub enum StartupError {
    /// Another socket is already listening on the address
    AddressInUse(SocketAddr),
    /// The port needs privileges the process does not have
    PermissionDenied(SocketAddr),
    /// Any other bind/listen failure
    Bind(SocketAddr, io::Error),
    /// The executable's directory could not be resolved or entered
    RootDirectory(io::Error),
    InvalidHost(String),
    Config(::config::ConfigError),
    Runtime(io::Error),
}

impl StartupError {
    /// Classify a bind failure for `addr`
    pub fn from_bind(addr: SocketAddr, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::AddrInUse => Self::AddressInUse(addr),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(addr),
            _ => Self::Bind(addr, err),
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressInUse(addr) => write!(
                f,
                "Port {} is already in use! Try a different port or stop the process using it",
                addr.port()
            ),
            Self::PermissionDenied(addr) => write!(
                f,
                "Permission denied binding {addr}; ports below 1024 usually need elevated privileges"
            ),
            Self::Bind(addr, e) => write!(f, "Failed to bind {addr}: {e}"),
            Self::RootDirectory(e) => write!(f, "Cannot resolve root directory: {e}"),
            Self::InvalidHost(h) => write!(f, "Invalid listen host: {h}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Runtime(e) => write!(f, "Failed to start runtime: {e}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bind(_, e) | Self::RootDirectory(e) | Self::Runtime(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::AddressInUse(_) | Self::PermissionDenied(_) | Self::InvalidHost(_) => None,
        }
    }
}

impl From<::config::ConfigError> for StartupError {
    fn from(error: ::config::ConfigError) -> Self {
        Self::Config(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "127.0.0.1:8000".parse().unwrap()
    }

    #[test]
    fn test_bind_error_classification() {
        let in_use = io::Error::from(io::ErrorKind::AddrInUse);
        assert!(matches!(
            StartupError::from_bind(addr(), in_use),
            StartupError::AddressInUse(_)
        ));

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(
            StartupError::from_bind(addr(), denied),
            StartupError::PermissionDenied(_)
        ));

        let other = io::Error::from(io::ErrorKind::AddrNotAvailable);
        assert!(matches!(
            StartupError::from_bind(addr(), other),
            StartupError::Bind(_, _)
        ));
    }

    #[test]
    fn test_messages_are_readable() {
        let msg = StartupError::AddressInUse(addr()).to_string();
        assert!(msg.contains("8000"));
        assert!(msg.contains("already in use"));
    }
}
