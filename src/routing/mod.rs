//! Routing module
//!
//! Matches request paths to the climate API routes and extracts the
//! `{start}` / `{end}` path parameters.

mod matcher;

pub use matcher::{match_route, ApiRoute, API_PREFIX};
