//! Persistence module
//!
//! Read-only access to the pre-populated SQLite climate database.

pub mod connection;
pub mod models;
pub mod store;

#[cfg(test)]
pub mod fixtures;

pub use connection::DatabaseError;
pub use store::ClimateStore;
