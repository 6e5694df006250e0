// Data formatter
// Turns query rows into response bodies

use super::types::{PrecipitationMap, RangeSummary, StartSummary, StationRecord, TobsRecord};
use crate::db::models::{PrecipitationReading, Station, TemperatureReading, TemperatureStats};

/// Rows are applied in order: the last reading for a date wins
pub fn precipitation_map(rows: Vec<PrecipitationReading>) -> PrecipitationMap {
    rows.into_iter().map(|r| (r.date, r.prcp)).collect()
}

pub fn station_records(stations: Vec<Station>) -> Vec<StationRecord> {
    stations
        .into_iter()
        .map(|s| StationRecord {
            station: s.station,
            name: s.name,
            latitude: s.latitude,
            longitude: s.longitude,
            elevation: s.elevation,
        })
        .collect()
}

pub fn tobs_records(rows: Vec<TemperatureReading>) -> Vec<TobsRecord> {
    rows.into_iter()
        .map(|r| TobsRecord {
            date: r.date,
            tobs: r.tobs,
        })
        .collect()
}

pub fn start_summary(start: &str, stats: TemperatureStats) -> StartSummary {
    StartSummary {
        start_date: start.to_string(),
        lowest: stats.min,
        average: stats.avg,
        maximum: stats.max,
    }
}

/// Empty when no observation fell in the range
pub fn range_summary(stats: TemperatureStats) -> Vec<RangeSummary> {
    if stats.is_empty() {
        return Vec::new();
    }
    match (stats.min, stats.avg, stats.max) {
        (Some(min), Some(avg), Some(max)) => vec![RangeSummary { min, avg, max }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(date: &str, prcp: Option<f64>) -> PrecipitationReading {
        PrecipitationReading {
            date: date.to_string(),
            prcp,
        }
    }

    #[test]
    fn test_precipitation_later_row_wins() {
        let map = precipitation_map(vec![
            reading("2017-08-18", Some(0.06)),
            reading("2017-08-17", Some(0.0)),
            reading("2017-08-18", None),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["2017-08-18"], None);
        assert_eq!(map["2017-08-17"], Some(0.0));
    }

    #[test]
    fn test_precipitation_json_shape() {
        let map = precipitation_map(vec![
            reading("2017-08-19", Some(0.09)),
            reading("2017-08-18", None),
        ]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2017-08-18":null,"2017-08-19":0.09}"#);
    }

    #[test]
    fn test_station_record_field_names() {
        let records = station_records(vec![Station {
            station: "USC00519281".to_string(),
            name: "WAIHEE 837.5, HI US".to_string(),
            latitude: 21.45167,
            longitude: -157.84889,
            elevation: 32.9,
        }]);
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(json[0]["Station"], "USC00519281");
        assert_eq!(json[0]["Name"], "WAIHEE 837.5, HI US");
        assert_eq!(json[0]["Latitude"], 21.45167);
        assert_eq!(json[0]["Longitude"], -157.84889);
        assert_eq!(json[0]["Elevation"], 32.9);
    }

    #[test]
    fn test_tobs_record_field_names() {
        let records = tobs_records(vec![TemperatureReading {
            date: "2017-08-18".to_string(),
            tobs: 79.0,
        }]);
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(json, r#"[{"Date":"2017-08-18","Tobs":79.0}]"#);
    }

    #[test]
    fn test_start_summary_labels_match_aggregates() {
        let stats = TemperatureStats {
            count: 3,
            min: Some(58.0),
            avg: Some(74.5),
            max: Some(87.0),
        };
        let json = serde_json::to_value(start_summary("2017-01-01", stats)).unwrap();
        assert_eq!(json["Start Date"], "2017-01-01");
        assert_eq!(json["Lowest Temperature"], 58.0);
        assert_eq!(json["Average Temperature"], 74.5);
        assert_eq!(json["Maximum Temperature"], 87.0);
    }

    #[test]
    fn test_start_summary_nulls_without_rows() {
        let json =
            serde_json::to_value(start_summary("2099-01-01", TemperatureStats::default())).unwrap();
        assert!(json["Lowest Temperature"].is_null());
        assert!(json["Average Temperature"].is_null());
        assert!(json["Maximum Temperature"].is_null());
    }

    #[test]
    fn test_range_summary() {
        let stats = TemperatureStats {
            count: 2,
            min: Some(79.0),
            avg: Some(80.0),
            max: Some(81.0),
        };
        let json = serde_json::to_string(&range_summary(stats)).unwrap();
        assert_eq!(
            json,
            r#"[{"Min Temperature":79.0,"Avg Temperature":80.0,"Max Temperature":81.0}]"#
        );

        assert!(range_summary(TemperatureStats::default()).is_empty());
    }
}
