//! HTTP response building module
//!
//! Status-code responses that do not depend on the climate data.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// 404 Not Found for any path outside the route table
pub fn build_404_response() -> Response<Full<Bytes>> {
    finish(
        "404",
        text_builder(StatusCode::NOT_FOUND, "404 Not Found"),
        Bytes::from_static(b"404 Not Found"),
    )
}

/// 405 Method Not Allowed; the API is read-only
pub fn build_405_response() -> Response<Full<Bytes>> {
    finish(
        "405",
        text_builder(StatusCode::METHOD_NOT_ALLOWED, "405 Method Not Allowed")
            .header(ALLOW, ALLOWED_METHODS),
        Bytes::from_static(b"405 Method Not Allowed"),
    )
}

/// 204 answer to OPTIONS, with CORS preflight headers when enabled
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, ALLOWED_METHODS);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    finish("OPTIONS", builder, Bytes::new())
}

/// Plain-text probe response, never cached
pub fn build_health_response(status: u16, body: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    finish(
        "health",
        text_builder(status, body).header(CACHE_CONTROL, "no-store"),
        body_unless_head(Bytes::from_static(body.as_bytes()), is_head),
    )
}

/// 200 HTML page
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content.len());
    finish("HTML", builder, body_unless_head(Bytes::from(content), is_head))
}

fn text_builder(status: StatusCode, body: &str) -> Builder {
    // Content-Length always describes the GET body, HEAD included
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain")
        .header(CONTENT_LENGTH, body.len())
}

fn body_unless_head(body: Bytes, is_head: bool) -> Bytes {
    if is_head {
        Bytes::new()
    } else {
        body
    }
}

fn finish(kind: &str, builder: Builder, body: Bytes) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {kind} response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}
