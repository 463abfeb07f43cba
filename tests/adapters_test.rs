//! Unit tests for feed parsing and per-source adapters.
//!
//! Run with: cargo test --test adapters_test

use chrono::{TimeZone, Utc};
use serde_json::json;

use marine_obs::feeds::adapters::{
    adapt_buoys_latest, adapt_wind_stations, canonical_key, display_config_for,
};
use marine_obs::feeds::models::{BuoyLatestDoc, WindStationsDoc};
use marine_obs::model::{Provenance, metric};

const T1: i64 = 1_741_600_800; // 2025-03-10 10:00:00 UTC
const T2: i64 = 1_741_604_400; // 2025-03-10 11:00:00 UTC

#[test]
fn meta_is_separated_from_the_station_map() {
    let doc: WindStationsDoc = serde_json::from_value(json!({
        "_meta": { "generated_utc": T1 },
        "howe-sound": {
            "name": "Howe Sound",
            "series": {}
        }
    }))
    .unwrap();

    let collection = adapt_wind_stations(&doc).unwrap();

    assert_eq!(
        collection.meta.generated_utc,
        Some(Utc.timestamp_opt(T1, 0).unwrap())
    );
    // The reserved key never shows up as a station
    assert_eq!(collection.stations.len(), 1);
    assert!(collection.stations.contains_key("howe-sound"));
}

#[test]
fn wire_samples_parse_with_and_without_gust_flag() {
    let doc: WindStationsDoc = serde_json::from_value(json!({
        "howe-sound": {
            "name": "Howe Sound",
            "series": {
                "wind_speed": {
                    "unit": "km/h",
                    "data": [[T1, 12.0], [T2, 18.0, true], [T2 + 600, null]]
                }
            }
        }
    }))
    .unwrap();

    let collection = adapt_wind_stations(&doc).unwrap();
    let data = &collection.stations["howe-sound"].timeseries[metric::WIND_SPEED].data;

    assert_eq!(data.len(), 3);
    assert!(!data[0].gusting);
    assert!(data[1].gusting);
    // null value means no reading, distinct from zero
    assert_eq!(data[2].value, None);
}

#[test]
fn buoy_vocabulary_is_reconciled_to_canonical_keys() {
    assert_eq!(canonical_key("wind_speed_kt"), metric::WIND_SPEED);
    assert_eq!(canonical_key("wind_dir_deg"), metric::WIND_DIR);
    assert_eq!(canonical_key("water_temp_c"), metric::WATER_TEMP);
    // Unknown keys pass through rather than being dropped
    assert_eq!(canonical_key("swell_height_m"), "swell_height_m");
}

#[test]
fn buoy_latest_prefers_field_time_over_generic_timestamp() {
    let doc: BuoyLatestDoc = serde_json::from_value(json!({
        "46146": {
            "name": "Halibut Bank",
            "timestamp": T1,
            "field_times": { "wind_speed_kt": T2 },
            "wind_speed_kt": 14.2,
            "wind_dir_deg": 215.0
        }
    }))
    .unwrap();

    let collection = adapt_buoys_latest(&doc).unwrap();
    let station = &collection.stations["46146"];

    // wind_speed has a field-specific time
    let speed = &station.timeseries[metric::WIND_SPEED].data[0];
    assert_eq!(speed.time, Utc.timestamp_opt(T2, 0).unwrap());
    assert_eq!(speed.value, Some(14.2));

    // wind_dir falls back to the generic observation time
    let dir = &station.timeseries[metric::WIND_DIR].data[0];
    assert_eq!(dir.time, Utc.timestamp_opt(T1, 0).unwrap());

    assert_eq!(station.provenance, Provenance::Buoy);
}

#[test]
fn display_exceptions_come_from_configuration() {
    let halibut = display_config_for("46146");
    assert_eq!(halibut.decimals, Some(2));
    assert_eq!(halibut.metric, metric::WIND_SPEED);

    let pam_rocks = display_config_for("pam-rocks");
    assert_eq!(pam_rocks.metric, metric::WIND_GUST);
    assert_eq!(pam_rocks.decimals, None);

    let default = display_config_for("anything-else");
    assert_eq!(default.metric, metric::WIND_SPEED);
    assert_eq!(default.decimals, None);
}

#[test]
fn out_of_order_samples_are_sorted_ascending() {
    let doc: WindStationsDoc = serde_json::from_value(json!({
        "howe-sound": {
            "name": "Howe Sound",
            "series": {
                "wind_speed": { "unit": "km/h", "data": [[T2, 2.0], [T1, 1.0]] }
            }
        }
    }))
    .unwrap();

    let collection = adapt_wind_stations(&doc).unwrap();
    let data = &collection.stations["howe-sound"].timeseries[metric::WIND_SPEED].data;

    assert!(data[0].time < data[1].time);
}

#[test]
fn malformed_document_is_surfaced_not_coerced() {
    // A station entry that is not an object fails the document parse
    let result: Result<WindStationsDoc, _> = serde_json::from_value(json!({
        "howe-sound": "not a station"
    }));

    assert!(result.is_err());
}
