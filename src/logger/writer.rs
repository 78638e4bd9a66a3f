//! Log writer module
//!
//! Global, level-filtered writer. Info and debug lines go to stdout,
//! warnings and errors to stderr.

use std::io::{self, Write};
use std::sync::OnceLock;

use super::format::{format_line, Level};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Thread-safe log writer
pub struct LogWriter {
    /// Lines less severe than this are dropped
    max_level: Level,
}

impl LogWriter {
    pub const fn new(max_level: Level) -> Self {
        Self { max_level }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    pub fn write(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let line = format_line(&chrono::Local::now(), level, message);
        if level.is_error() {
            let _ = writeln!(io::stderr().lock(), "{line}");
        } else {
            let _ = writeln!(io::stdout().lock(), "{line}");
        }
    }
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
pub fn init(max_level: Level) -> io::Result<()> {
    LOG_WRITER.set(LogWriter::new(max_level)).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter() {
        let writer = LogWriter::new(Level::Warn);
        assert!(writer.enabled(Level::Error));
        assert!(writer.enabled(Level::Warn));
        assert!(!writer.enabled(Level::Info));
        assert!(!writer.enabled(Level::Debug));
    }
}
