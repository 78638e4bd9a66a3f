// Configuration module entry point
// Loads ambient settings and resolves the immutable server configuration

mod server;
mod types;

use std::path::PathBuf;

use crate::error::StartupError;

// Re-export public types
pub use server::ServerConfig;
pub use types::Settings;

/// Environment variable prefix, e.g. `NOCACHE__SERVER__PORT=9000`
const ENV_PREFIX: &str = "NOCACHE";

impl Settings {
    /// Load settings from defaults, overridden by environment variables.
    /// No configuration file is read.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 30)?
            .set_default("performance.connection_timeout", 300)?
            .build()?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that deserialize but cannot be used
    fn validate(&self) -> Result<(), ::config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(::config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Directory containing the running executable, resolved to an absolute path.
/// The current working directory is never consulted.
pub fn resolve_root() -> Result<PathBuf, StartupError> {
    let exe = std::env::current_exe().map_err(StartupError::RootDirectory)?;
    let dir = exe.parent().ok_or_else(|| {
        StartupError::RootDirectory(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        ))
    })?;
    dir.canonicalize().map_err(StartupError::RootDirectory)
}
