use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;
#[cfg(test)]
mod testutil;

use config::{ServerConfig, Settings};
use error::StartupError;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_startup_failed(&e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    let settings = Settings::load()?;
    if let Err(e) = logger::init(&settings.logging.level) {
        eprintln!("[WARN] Logger not initialized ({e}), using defaults");
    }

    let root = config::resolve_root()?;
    std::env::set_current_dir(&root).map_err(StartupError::RootDirectory)?;
    logger::log_info(&format!("Working directory set to {}", root.display()));
    let server_config = Arc::new(ServerConfig::from_settings(&settings, root)?);

    // Create Tokio runtime, sized by `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = settings.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_debug(&format!("Using {workers} worker threads"));
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(server_config))?;

    // In-flight connection tasks are dropped with the runtime
    runtime.shutdown_background();
    logger::log_server_stopped();
    Ok(())
}

async fn async_main(config: Arc<ServerConfig>) -> Result<(), StartupError> {
    let addr = config.socket_addr();
    let listener = server::create_listener(addr)?;
    let bound = listener.local_addr().unwrap_or(addr);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals)).map_err(StartupError::Runtime)?;

    logger::log_server_start(&bound, &config);
    server::start_server_loop(listener, config, signals).await;
    Ok(())
}
