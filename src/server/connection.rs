// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;
use tracing::debug;

use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Accept a connection, enforcing `performance.max_connections`.
///
/// Rejected connections are dropped immediately; accepted ones are served
/// on a spawned task that releases its slot in `conn_counter` when done.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
    shutdown: &Arc<ShutdownSignal>,
) {
    // Increment first, then check, so concurrent accepts cannot both slip under the limit
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    debug!("Accepted connection from {peer_addr}");
    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
        Arc::clone(shutdown),
    );
}

/// Serve one connection with HTTP/1.1.
///
/// The connection lives at most `Config::connection_timeout()`. On shutdown
/// hyper finishes the in-flight request, if any, and closes the connection
/// instead of waiting for the client to go idle.
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
    shutdown: Arc<ShutdownSignal>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout = state.config.connection_timeout();
        let deadline = tokio::time::Instant::now() + timeout;

        // keep_alive_timeout only switches keep-alive on or off; the
        // connection as a whole is bounded by `timeout`
        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                handler::handle_request(req, Arc::clone(&service_state), peer_addr)
            }),
        );
        tokio::pin!(conn);

        let outcome = tokio::select! {
            result = conn.as_mut() => Some(result),
            () = shutdown.wait() => {
                debug!("Closing connection from {peer_addr} for shutdown");
                conn.as_mut().graceful_shutdown();
                tokio::time::timeout_at(deadline, conn.as_mut()).await.ok()
            }
            () = tokio::time::sleep_until(deadline) => None,
        };

        match outcome {
            Some(Ok(())) => {}
            Some(Err(err)) => logger::log_connection_error(&err),
            None => logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout.as_secs()
            )),
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}
