//! Unit tests for the window filter.
//!
//! Run with: cargo test --test window_test

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use marine_obs::core::window::window_collection;
use marine_obs::model::{
    Collection, DisplayConfig, MetricSeries, Provenance, Sample, SnapshotMeta, Station, metric,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

fn station_with_samples(id: &str, hours_ago: &[i64]) -> Station {
    let mut series = MetricSeries::new(metric::WIND_SPEED, "km/h");
    // Callers list hours-ago from oldest to newest, so times come out ascending
    for (i, h) in hours_ago.iter().enumerate() {
        series.data.push(Sample::new(
            now() - Duration::hours(*h),
            Some(i as f64 * 10.0),
        ));
    }
    Station {
        id: id.to_string(),
        name: id.to_string(),
        region: None,
        location: None,
        provenance: Provenance::Land,
        display: DisplayConfig::default(),
        timeseries: HashMap::from([(metric::WIND_SPEED.to_string(), series)]),
    }
}

fn collection(stations: Vec<Station>) -> Collection {
    let mut c = Collection::new(SnapshotMeta {
        generated_utc: Some(now() - Duration::minutes(15)),
    });
    for s in stations {
        c.stations.insert(s.id.clone(), s);
    }
    c
}

#[test]
fn keeps_only_samples_within_window() {
    let input = collection(vec![station_with_samples("howe", &[30, 20, 5, 1])]);

    let windowed = window_collection(&input, 24, now());

    let data = &windowed.stations["howe"].timeseries[metric::WIND_SPEED].data;
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|s| s.time >= now() - Duration::hours(24)));
}

#[test]
fn does_not_mutate_the_input() {
    let input = collection(vec![station_with_samples("howe", &[30, 5])]);
    let before = input.clone();

    let _ = window_collection(&input, 6, now());

    assert_eq!(input, before);
}

#[test]
fn meta_passes_through_unchanged() {
    let input = collection(vec![station_with_samples("howe", &[5])]);

    let windowed = window_collection(&input, 24, now());

    assert_eq!(windowed.meta, input.meta);
}

#[test]
fn empty_station_shape_is_retained() {
    let input = collection(vec![station_with_samples("howe", &[30, 40])]);

    let windowed = window_collection(&input, 24, now());

    // Nothing in the window, but the station is still present for lookups
    let station = &windowed.stations["howe"];
    assert!(station.timeseries[metric::WIND_SPEED].data.is_empty());
}

#[test]
fn zero_or_negative_duration_yields_empty_data_not_error() {
    let input = collection(vec![station_with_samples("howe", &[1, 2])]);

    for hours in [0, -5] {
        let windowed = window_collection(&input, hours, now());
        assert!(
            windowed.stations["howe"].timeseries[metric::WIND_SPEED]
                .data
                .is_empty()
        );
    }
}

#[test]
fn smaller_window_is_subset_of_larger() {
    let input = collection(vec![
        station_with_samples("howe", &[47, 30, 23, 11, 2]),
        station_with_samples("epsilon", &[25, 13, 1]),
    ]);

    for (h1, h2) in [(0i64, 24i64), (6, 24), (24, 48)] {
        let small = window_collection(&input, h1, now());
        let large = window_collection(&input, h2, now());
        for (id, station) in &small.stations {
            for (key, series) in &station.timeseries {
                let larger = &large.stations[id].timeseries[key].data;
                for sample in &series.data {
                    assert!(larger.contains(sample), "{id}/{key} sample missing in {h2}h");
                }
            }
        }
    }
}

#[test]
fn windowing_is_idempotent_for_same_duration() {
    let input = collection(vec![station_with_samples("howe", &[47, 23, 2])]);

    let once = window_collection(&input, 24, now());
    let twice = window_collection(&once, 24, now());

    assert_eq!(once, twice);
}
