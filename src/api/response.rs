// API response utility functions module

use crate::handler::router::RequestContext;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::types::ErrorBody;

const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let serialized = if ctx.pretty_json {
        serde_json::to_vec_pretty(body)
    } else {
        serde_json::to_vec(body)
    };

    match serialized {
        Ok(json) => build_json(status, Bytes::from(json), ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            internal_error(ctx)
        }
    }
}

/// 500 Internal Server Error response
pub fn internal_error(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    build_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
        ctx.is_head,
    )
}

/// 400 Bad Request response
pub fn bad_request(message: &str, ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let body = ErrorBody {
        error: "Bad Request",
        message: Some(message),
    };
    json_response(StatusCode::BAD_REQUEST, &body, ctx)
}

fn build_json(status: StatusCode, body: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}
