// Response body types for the climate API
// Field names are part of the public JSON contract

use serde::Serialize;
use std::collections::BTreeMap;

/// `/api/v1.0/precipitation`: date -> precipitation (null when not recorded)
pub type PrecipitationMap = BTreeMap<String, Option<f64>>;

/// One entry of `/api/v1.0/stations`
#[derive(Debug, Serialize, PartialEq)]
pub struct StationRecord {
    #[serde(rename = "Station")]
    pub station: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Elevation")]
    pub elevation: f64,
}

/// One entry of `/api/v1.0/tobs`
#[derive(Debug, Serialize, PartialEq)]
pub struct TobsRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Tobs")]
    pub tobs: f64,
}

/// `/api/v1.0/{start}`
#[derive(Debug, Serialize, PartialEq)]
pub struct StartSummary {
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Lowest Temperature")]
    pub lowest: Option<f64>,
    #[serde(rename = "Average Temperature")]
    pub average: Option<f64>,
    #[serde(rename = "Maximum Temperature")]
    pub maximum: Option<f64>,
}

/// Single entry of `/api/v1.0/{start}/{end}`
#[derive(Debug, Serialize, PartialEq)]
pub struct RangeSummary {
    #[serde(rename = "Min Temperature")]
    pub min: f64,
    #[serde(rename = "Avg Temperature")]
    pub avg: f64,
    #[serde(rename = "Max Temperature")]
    pub max: f64,
}

/// Error body for 4xx/5xx JSON responses
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}
