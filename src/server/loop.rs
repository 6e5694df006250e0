// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::error::AppError;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until `shutdown` fires.
///
/// After shutdown the listener is closed and every open connection is told to
/// finish its current request and close; stragglers get up to
/// `Config::connection_timeout()`.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) -> Result<(), AppError> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                            &shutdown,
                        );
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.wait() => break,
        }
    }

    drop(listener);
    let remaining = drain_connections(&active_connections, state.config.connection_timeout()).await;
    logger::log_shutdown_complete(remaining);
    Ok(())
}

/// Wait for the counter to reach zero or the grace period to elapse.
/// Returns the number of connections still open.
async fn drain_connections(counter: &AtomicUsize, grace: Duration) -> usize {
    logger::log_shutdown_started(counter.load(Ordering::SeqCst));

    let deadline = tokio::time::Instant::now() + grace;
    loop {
        let active = counter.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::db::fixtures::TestDatabase;
    use crate::db::ClimateStore;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn state_for(db: &TestDatabase) -> Arc<AppState> {
        let mut config = Config::load_from("no-such-config-file").unwrap();
        config.database = db.config();
        let store = ClimateStore::open(&config.database).unwrap();
        Arc::new(AppState::new(config, store))
    }

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let db = TestDatabase::new();
        db.add_station("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0);
        let state = state_for(&db);

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());
        let server = tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));

        let response = get(addr, "/api/v1.0/stations").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("\"Station\":\"USC00519397\""));

        let response = get(addr, "/nope").await;
        assert!(response.starts_with("HTTP/1.1 404"));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_closes_idle_keep_alive_connection() {
        let db = TestDatabase::new();
        let mut config = Config::load_from("no-such-config-file").unwrap();
        config.database = db.config();
        config.logging.access_log = false;
        config.performance.read_timeout = 10;
        config.performance.write_timeout = 10;
        let store = ClimateStore::open(&config.database).unwrap();
        let state = Arc::new(AppState::new(config, store));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());
        let server = tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));

        // One keep-alive request, then leave the connection idle
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /api/v1.0/stations HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !received.ends_with(b"[]") {
            let n = stream.read(&mut buf).await.unwrap();
            assert_ne!(n, 0, "connection closed before the response finished");
            received.extend_from_slice(&buf[..n]);
        }

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(2), server)
            .await
            .expect("shutdown waited on the idle connection")
            .unwrap()
            .unwrap();

        let n = tokio::time::timeout(Duration::from_secs(1), stream.read(&mut buf))
            .await
            .unwrap()
            .unwrap_or(0);
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_drain_returns_when_idle() {
        let counter = AtomicUsize::new(0);
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let counter = AtomicUsize::new(2);
        let remaining = drain_connections(&counter, Duration::from_millis(120)).await;
        assert_eq!(remaining, 2);
    }
}
