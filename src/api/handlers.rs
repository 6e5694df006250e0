// Climate API handlers
// One query per request; formatting lives in `format`

use chrono::{Duration, Local, NaiveDate};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::format;
use super::response::{bad_request, json_response};
use crate::config::AppState;
use crate::db::DatabaseError;
use crate::handler::router::RequestContext;

type HandlerResult = Result<Response<Full<Bytes>>, DatabaseError>;

/// Precipitation over the trailing lookback window
pub async fn handle_precipitation(ctx: &RequestContext<'_>, state: &AppState) -> HandlerResult {
    let since = window_start(today(), state.config.climate.lookback_days);
    let rows = state.store.precipitation_since(&since).await?;
    Ok(json_response(
        StatusCode::OK,
        &format::precipitation_map(rows),
        ctx,
    ))
}

pub async fn handle_stations(ctx: &RequestContext<'_>, state: &AppState) -> HandlerResult {
    let stations = state.store.stations().await?;
    Ok(json_response(
        StatusCode::OK,
        &format::station_records(stations),
        ctx,
    ))
}

/// Observations of the configured station over the trailing lookback window
pub async fn handle_tobs(ctx: &RequestContext<'_>, state: &AppState) -> HandlerResult {
    let climate = &state.config.climate;
    let since = window_start(today(), climate.lookback_days);
    let rows = state
        .store
        .tobs_for_station_since(&climate.tobs_station, &since)
        .await?;
    Ok(json_response(StatusCode::OK, &format::tobs_records(rows), ctx))
}

pub async fn handle_start_summary(
    ctx: &RequestContext<'_>,
    state: &AppState,
    start: &str,
) -> HandlerResult {
    if let Some(resp) = reject_malformed_date(ctx, state, start) {
        return Ok(resp);
    }

    let stats = state.store.temperature_stats(start, None).await?;
    Ok(json_response(
        StatusCode::OK,
        &format::start_summary(start, stats),
        ctx,
    ))
}

pub async fn handle_range_summary(
    ctx: &RequestContext<'_>,
    state: &AppState,
    start: &str,
    end: &str,
) -> HandlerResult {
    for date in [start, end] {
        if let Some(resp) = reject_malformed_date(ctx, state, date) {
            return Ok(resp);
        }
    }

    let stats = state.store.temperature_stats(start, Some(end)).await?;
    Ok(json_response(
        StatusCode::OK,
        &format::range_summary(stats),
        ctx,
    ))
}

/// 400 for a non-ISO date, only when strict dates are enabled
fn reject_malformed_date(
    ctx: &RequestContext<'_>,
    state: &AppState,
    date: &str,
) -> Option<Response<Full<Bytes>>> {
    if !state.config.climate.strict_dates || is_iso_date(date) {
        return None;
    }
    Some(bad_request(
        &format!("invalid date '{date}', expected YYYY-MM-DD"),
        ctx,
    ))
}

/// `YYYY-MM-DD` with zero padding, so it sorts like the stored dates
fn is_iso_date(value: &str) -> bool {
    // chrono skips leading whitespace and accepts signs and one-digit fields,
    // so the byte layout is checked before the calendar
    let shape_ok = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    shape_ok && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First day of the window that ends today, as stored in `measurement.date`
fn window_start(today: NaiveDate, lookback_days: u32) -> String {
    (today - Duration::days(i64::from(lookback_days)))
        .format("%Y-%m-%d")
        .to_string()
}
