//! Record types for the `station` and `measurement` tables.
//!
//! Columns are read by name, so the query projection has to use these
//! column names (or matching aliases).

use rusqlite::Row;

/// One row of the `station` table
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl Station {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            station: row.get("station")?,
            name: row.get("name")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
            elevation: row.get("elevation")?,
        })
    }
}

/// `measurement.date` and `measurement.prcp`
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: String,
    /// Null when no precipitation was recorded
    pub prcp: Option<f64>,
}

impl PrecipitationReading {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get("date")?,
            prcp: row.get("prcp")?,
        })
    }
}

/// `measurement.date` and `measurement.tobs`
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

impl TemperatureReading {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            date: row.get("date")?,
            tobs: row.get("tobs")?,
        })
    }
}

/// Aggregate of `tobs` over a date range.
///
/// `count` is the number of non-null observations; the other fields are
/// `None` exactly when it is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureStats {
    pub count: i64,
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            count: row.get("tobs_count")?,
            min: row.get("tobs_min")?,
            avg: row.get("tobs_avg")?,
            max: row.get("tobs_max")?,
        })
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}
