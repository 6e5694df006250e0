//! Read queries over the climate database.

use std::sync::Arc;

use rusqlite::{params, Connection};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::{create_pool, ConnectionPool, DatabaseError};
use super::models::{PrecipitationReading, Station, TemperatureReading, TemperatureStats};
use crate::config::DatabaseConfig;

const PRECIPITATION_SINCE: &str =
    "SELECT date, prcp FROM measurement WHERE date >= ?1 ORDER BY rowid";

const ALL_STATIONS: &str =
    "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY rowid";

const TOBS_FOR_STATION_SINCE: &str =
    "SELECT date, tobs FROM measurement WHERE station = ?1 AND date >= ?2 ORDER BY rowid";

const TOBS_STATS_FROM: &str = "SELECT COUNT(tobs) AS tobs_count, MIN(tobs) AS tobs_min, \
     AVG(tobs) AS tobs_avg, MAX(tobs) AS tobs_max \
     FROM measurement WHERE date >= ?1";

const TOBS_STATS_BETWEEN: &str = "SELECT COUNT(tobs) AS tobs_count, MIN(tobs) AS tobs_min, \
     AVG(tobs) AS tobs_avg, MAX(tobs) AS tobs_max \
     FROM measurement WHERE date >= ?1 AND date <= ?2";

/// Handle to the climate database.
///
/// Cloning is cheap; every clone shares the same pool. Each query checks out
/// its own connection on the blocking pool and returns it before the result
/// is handed back.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: Arc<ConnectionPool>,
}

impl ClimateStore {
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Open the configured database file
    pub fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self::new(Arc::new(create_pool(config)?)))
    }

    /// Every measurement dated on or after `since`, in table order
    #[instrument(skip(self))]
    pub async fn precipitation_since(
        &self,
        since: &str,
    ) -> Result<Vec<PrecipitationReading>, DatabaseError> {
        let since = since.to_owned();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare_cached(PRECIPITATION_SINCE)?;
            let rows = stmt
                .query_map(params![since], PrecipitationReading::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(rows = rows.len(), "Loaded precipitation");
            Ok(rows)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn stations(&self) -> Result<Vec<Station>, DatabaseError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare_cached(ALL_STATIONS)?;
            let rows = stmt
                .query_map([], Station::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(rows = rows.len(), "Loaded stations");
            Ok(rows)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn tobs_for_station_since(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TemperatureReading>, DatabaseError> {
        let station = station.to_owned();
        let since = since.to_owned();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare_cached(TOBS_FOR_STATION_SINCE)?;
            let rows = stmt
                .query_map(params![station, since], TemperatureReading::from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            debug!(rows = rows.len(), "Loaded temperature observations");
            Ok(rows)
        })
        .await
    }

    /// Min/avg/max of `tobs` for `start <= date`, bounded by `end` when given.
    ///
    /// Dates are compared as text, so values that are not ISO dates simply
    /// match nothing.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, DatabaseError> {
        let start = start.to_owned();
        let end = end.map(str::to_owned);
        self.with_connection(move |conn| {
            let stats = match end {
                Some(end) => conn.query_row(
                    TOBS_STATS_BETWEEN,
                    params![start, end],
                    TemperatureStats::from_row,
                )?,
                None => conn.query_row(TOBS_STATS_FROM, params![start], TemperatureStats::from_row)?,
            };
            debug!(count = stats.count, "Computed temperature stats");
            Ok(stats)
        })
        .await
    }

    /// Check out a connection and run a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&*conn)
        })
        .await?
    }
}
