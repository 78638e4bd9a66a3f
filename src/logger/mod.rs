//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Startup banner and shutdown confirmation
//! - Leveled, timestamped diagnostic lines
//!
//! There is no access log; requests are only logged at debug level.

mod format;
pub mod writer;

pub use format::Level;

use crate::config::ServerConfig;
use std::net::SocketAddr;

const RULE_WIDTH: usize = 60;

/// Initialize the logger with the configured level name
///
/// Should be called once at application startup.
pub fn init(level: &str) -> std::io::Result<()> {
    let level = level
        .parse::<Level>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(level)
}

fn write(level: Level, message: &str) {
    if let Some(w) = writer::get() {
        w.write(level, message);
    } else if level.is_error() {
        eprintln!("[{level}] {message}");
    } else if level != Level::Debug {
        println!("[{level}] {message}");
    }
}

/// Render the startup banner shown before the accept loop starts
pub fn banner_lines(addr: &SocketAddr, config: &ServerConfig) -> Vec<String> {
    let rule = "=".repeat(RULE_WIDTH);
    let port = addr.port();
    vec![
        rule.clone(),
        "Server is running!".to_string(),
        rule.clone(),
        "Open your browser and go to:".to_string(),
        format!("   http://localhost:{port}"),
        format!("   http://127.0.0.1:{port}"),
        rule.clone(),
        format!("Serving files from: {}", config.root.display()),
        "Caching disabled: every response is sent with no-store headers".to_string(),
        rule.clone(),
        "Press Ctrl+C to stop the server".to_string(),
        rule,
    ]
}

pub fn log_server_start(addr: &SocketAddr, config: &ServerConfig) {
    for line in banner_lines(addr, config) {
        println!("{line}");
    }
}

pub fn log_server_stopped() {
    println!("\n\nServer stopped.");
}

pub fn log_startup_failed(err: &crate::error::StartupError) {
    eprintln!("Error: {err}");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write(Level::Warn, &format!("Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write(Level::Error, message);
}

pub fn log_warning(message: &str) {
    write(Level::Warn, message);
}

pub fn log_info(message: &str) {
    write(Level::Info, message);
}

pub fn log_debug(message: &str) {
    write(Level::Debug, message);
}

pub fn log_traversal_blocked(request_path: &str, resolved: &std::path::Path) {
    log_warning(&format!(
        "Path traversal attempt blocked: {request_path} -> {}",
        resolved.display()
    ));
}
