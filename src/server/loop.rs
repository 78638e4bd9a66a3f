// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::signal::SignalHandler;
use crate::config::ServerConfig;
use crate::logger;

/// Pause after a failed `accept` (e.g. out of file descriptors)
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Accept connections and hand each to its own task.
///
/// Returns once `signals` requests shutdown. The listener is dropped on
/// return, so no further connections are accepted; connection tasks that
/// are still running are left to the runtime.
pub async fn start_server_loop(
    listener: TcpListener,
    config: Arc<ServerConfig>,
    signals: Arc<SignalHandler>,
) {
    while !signals.is_shutdown_requested() {
        tokio::select! {
            biased;

            () = signals.shutdown.notified() => {
                logger::log_debug("Shutdown requested, leaving accept loop");
                break;
            }

            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        logger::log_debug(&format!("Accepted connection from {peer_addr}"));
                        handle_connection(stream, peer_addr, &config);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                    }
                }
            }
        }
    }

    drop(listener);
}
