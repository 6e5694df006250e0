//! Temporary SQLite databases with the climate schema, for tests.

use rusqlite::{params, Connection};
use tempfile::TempDir;

use crate::config::DatabaseConfig;

const SCHEMA: &str = "
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT
    );
";

/// A database file living as long as the value itself
pub struct TestDatabase {
    dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Self { dir };
        db.connect().execute_batch(SCHEMA).unwrap();
        db
    }

    pub fn path(&self) -> String {
        self.dir.path().join("hawaii.sqlite").display().to_string()
    }

    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.path(),
            max_connections: 2,
            acquire_timeout_ms: 1000,
        }
    }

    pub fn add_station(&self, code: &str, name: &str, lat: f64, lng: f64, elevation: f64) {
        self.connect()
            .execute(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![code, name, lat, lng, elevation],
            )
            .unwrap();
    }

    pub fn add_measurement(&self, station: &str, date: &str, prcp: Option<f64>, tobs: f64) {
        self.connect()
            .execute(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
                params![station, date, prcp, tobs],
            )
            .unwrap();
    }

    pub fn drop_table(&self, table: &str) {
        self.connect()
            .execute_batch(&format!("DROP TABLE {table}"))
            .unwrap();
    }

    fn connect(&self) -> Connection {
        Connection::open(self.path()).unwrap()
    }
}
