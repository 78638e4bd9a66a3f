use serde::Deserialize;

/// Ambient settings, loaded from built-in defaults and `NOCACHE__*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub performance: PerformanceSettings,
}

/// Listener settings
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging settings
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Minimum level printed: error, warn, info or debug
    pub level: String,
}

/// Connection handling settings (seconds)
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceSettings {
    pub keep_alive: bool,
    pub header_read_timeout: u64,
    pub connection_timeout: u64,
}
