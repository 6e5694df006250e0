// API module entry
// Climate data endpoints under /api/v1.0

mod format;
mod handlers;
mod index;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use crate::routing::ApiRoute;
use index::index_page;

/// API route handler
///
/// Runs the handler for a matched route. A failed query is logged and
/// answered with 500; an empty result is not an error.
pub async fn handle_api_route(
    route: ApiRoute,
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let result = match &route {
        ApiRoute::Index => return http::build_html_response(index_page(), ctx.is_head),
        ApiRoute::Precipitation => handlers::handle_precipitation(ctx, state).await,
        ApiRoute::Stations => handlers::handle_stations(ctx, state).await,
        ApiRoute::Tobs => handlers::handle_tobs(ctx, state).await,
        ApiRoute::StartSummary { start } => handlers::handle_start_summary(ctx, state, start).await,
        ApiRoute::RangeSummary { start, end } => {
            handlers::handle_range_summary(ctx, state, start, end).await
        }
    };

    result.unwrap_or_else(|e| {
        logger::log_error(&format!("Query for {} failed: {e}", ctx.path));
        response::internal_error(ctx)
    })
}
