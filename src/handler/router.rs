//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation, route matching, and dispatching.

use crate::api;
use crate::config::{AppState, HttpConfig};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub pretty_json: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let entry = state
        .config
        .logging
        .access_log
        .then(|| AccessLogEntry::from_request(&req, peer_addr));

    let mut response = route_request(req.method(), req.uri().path(), &state).await;
    apply_common_headers(&mut response, &state.config.http);

    if let Some(mut entry) = entry {
        entry.record_response(&response, started.elapsed());
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on method and path
async fn route_request(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    let ctx = RequestContext {
        path,
        is_head: *method == Method::HEAD,
        pretty_json: state.config.http.pretty_json,
    };

    // 2. Health check endpoints
    let health = &state.config.health;
    if health.enabled {
        if ctx.path == health.liveness_path {
            return http::build_health_response(200, "ok", ctx.is_head);
        }
        if ctx.path == health.readiness_path {
            return match state.store.ping().await {
                Ok(()) => http::build_health_response(200, "ok", ctx.is_head),
                Err(e) => {
                    logger::log_warning(&format!("Readiness check failed: {e}"));
                    http::build_health_response(503, "unavailable", ctx.is_head)
                }
            };
        }
    }

    // 3. Climate API routes
    match routing::match_route(ctx.path) {
        Some(route) => api::handle_api_route(route, &ctx, state).await,
        None => http::build_404_response(),
    }
}

/// Headers every response carries
fn apply_common_headers(response: &mut Response<Full<Bytes>>, http_config: &HttpConfig) {
    let headers = response.headers_mut();
    if let Ok(server) = HeaderValue::from_str(&http_config.server_name) {
        headers.insert(SERVER, server);
    }
    if http_config.enable_cors {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}
