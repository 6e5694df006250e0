//! Request handler module
//!
//! Responsible for request routing dispatch: method checks, health probes
//! and handing matched routes to the climate API.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
