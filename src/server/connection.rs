// Connection handling module
// Serves a single accepted TCP connection in its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1 settings (keep-alive, header read timeout)
/// 3. Serves the connection with the request handler
/// 4. Caps the whole connection at `connection_timeout`
///
/// Errors are logged and end only this connection.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, config: &Arc<ServerConfig>) {
    let config = Arc::clone(config);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout_duration = config.connection_timeout;

        let mut builder = http1::Builder::new();
        builder
            .keep_alive(config.keep_alive)
            .timer(TokioTimer::new())
            .header_read_timeout(config.header_read_timeout);

        let service_config = Arc::clone(&config);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_config))),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}
