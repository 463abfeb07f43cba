//! Unit tests for the hourly bucketer: bucketing, pagination, labels,
//! and per-station formatting.
//!
//! Run with: cargo test --test bucket_test

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

use marine_obs::core::bucket::{PLACEHOLDER, build_hourly_table};
use marine_obs::model::{
    Collection, DisplayConfig, MetricSeries, Provenance, Sample, SnapshotMeta, Station, metric,
};

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, minute, 0).unwrap()
}

fn station(id: &str, display: DisplayConfig, samples: &[(DateTime<Utc>, Option<f64>)]) -> Station {
    let mut series = MetricSeries::new(display.metric.clone(), "km/h");
    for (time, value) in samples {
        series.data.push(Sample::new(*time, *value));
    }
    Station {
        id: id.to_string(),
        name: id.to_string(),
        region: None,
        location: None,
        provenance: Provenance::Land,
        display: display.clone(),
        timeseries: HashMap::from([(display.metric, series)]),
    }
}

fn collection(stations: Vec<Station>) -> Collection {
    let mut c = Collection::new(SnapshotMeta::default());
    for s in stations {
        c.stations.insert(s.id.clone(), s);
    }
    c
}

#[test]
fn samples_bucket_to_hours_and_last_in_hour_wins() {
    let input = collection(vec![station(
        "howe",
        DisplayConfig::default(),
        &[
            (at(3, 1, 5), Some(10.0)),
            (at(3, 1, 50), Some(14.0)),
            (at(3, 2, 10), Some(18.0)),
        ],
    )]);

    let table = build_hourly_table(&input, &["howe"]);

    assert_eq!(table.rows.len(), 2);
    // Most recent first
    assert_eq!(table.rows[0].hour, at(3, 2, 0));
    assert_eq!(table.rows[1].hour, at(3, 1, 0));
    // The 01:00 bucket holds the 01:50 value
    assert_eq!(table.rows[1].values[0], Some(14.0));
    assert_eq!(table.rows[0].values[0], Some(18.0));
}

#[test]
fn pagination_splits_at_ceiling_of_half() {
    let samples: Vec<(DateTime<Utc>, Option<f64>)> =
        (0..24).map(|h| (at(3, h, 30), Some(f64::from(h)))).collect();
    let input = collection(vec![station("howe", DisplayConfig::default(), &samples)]);

    let table = build_hourly_table(&input, &["howe"]);

    assert_eq!(table.rows.len(), 24);
    assert_eq!(table.visible_rows, 12);
    assert!(table.has_hidden);
}

#[test]
fn single_row_table_shows_no_expand_control() {
    let input = collection(vec![station(
        "howe",
        DisplayConfig::default(),
        &[(at(3, 5, 10), Some(9.0))],
    )]);

    let table = build_hourly_table(&input, &["howe"]);

    assert_eq!(table.visible_rows, 1);
    assert!(!table.has_hidden);
}

#[test]
fn odd_row_count_rounds_visible_up() {
    let samples: Vec<(DateTime<Utc>, Option<f64>)> =
        (0..5).map(|h| (at(3, h, 0), Some(1.0))).collect();
    let input = collection(vec![station("howe", DisplayConfig::default(), &samples)]);

    let table = build_hourly_table(&input, &["howe"]);

    assert_eq!(table.visible_rows, 3);
    assert!(table.has_hidden);
}

#[test]
fn label_repeats_date_only_on_day_change() {
    let input = collection(vec![station(
        "howe",
        DisplayConfig::default(),
        &[(at(2, 23, 30), Some(5.0)), (at(3, 0, 30), Some(6.0))],
    )]);

    let table = build_hourly_table(&input, &["howe"]);

    // Descending: 3 Mar 00:00 first, then 2 Mar 23:00 crosses midnight
    assert_eq!(table.rows[0].label, "3 Mar 00:00");
    assert_eq!(table.rows[1].label, "2 Mar 23:00");

    let same_day = collection(vec![station(
        "howe",
        DisplayConfig::default(),
        &[(at(3, 10, 15), Some(5.0)), (at(3, 11, 15), Some(6.0))],
    )]);
    let table = build_hourly_table(&same_day, &["howe"]);
    assert_eq!(table.rows[0].label, "3 Mar 11:00");
    assert_eq!(table.rows[1].label, "10:00");
}

#[test]
fn fixed_decimals_apply_only_to_configured_station() {
    let input = collection(vec![
        station(
            "46146",
            DisplayConfig {
                metric: metric::WIND_SPEED.to_string(),
                decimals: Some(2),
            },
            &[(at(3, 1, 0), Some(7.5))],
        ),
        station(
            "howe",
            DisplayConfig::default(),
            &[(at(3, 1, 0), Some(12.0))],
        ),
    ]);

    let table = build_hourly_table(&input, &["46146", "howe"]);

    assert_eq!(table.rows[0].text[0], "7.50");
    assert_eq!(table.rows[0].text[1], "12");
}

#[test]
fn absent_values_render_as_placeholder() {
    let input = collection(vec![
        station("howe", DisplayConfig::default(), &[(at(3, 1, 0), Some(4.0))]),
        station("epsilon", DisplayConfig::default(), &[(at(3, 2, 0), None)]),
    ]);

    let table = build_hourly_table(&input, &["howe", "epsilon"]);

    // epsilon has no reading in the 01:00 bucket, a null one at 02:00
    let row_01 = table.rows.iter().find(|r| r.hour == at(3, 1, 0)).unwrap();
    let row_02 = table.rows.iter().find(|r| r.hour == at(3, 2, 0)).unwrap();
    assert_eq!(row_01.text[1], PLACEHOLDER);
    assert_eq!(row_02.text[1], PLACEHOLDER);
    assert_ne!(row_01.text[1], "0");
}

#[test]
fn column_uses_the_stations_designated_display_metric() {
    let mut gust_station = station(
        "pam-rocks",
        DisplayConfig {
            metric: metric::WIND_GUST.to_string(),
            decimals: None,
        },
        &[(at(3, 1, 0), Some(35.0))],
    );
    // A wind_speed series exists too, but the column must show gusts
    gust_station.timeseries.insert(
        metric::WIND_SPEED.to_string(),
        MetricSeries::new(metric::WIND_SPEED, "km/h"),
    );
    let input = collection(vec![gust_station]);

    let table = build_hourly_table(&input, &["pam-rocks"]);

    assert_eq!(table.columns[0].metric, metric::WIND_GUST);
    assert_eq!(table.rows[0].values[0], Some(35.0));
}

#[test]
fn unknown_column_degrades_to_placeholders() {
    let input = collection(vec![station(
        "howe",
        DisplayConfig::default(),
        &[(at(3, 1, 0), Some(4.0))],
    )]);

    let table = build_hourly_table(&input, &["howe", "missing"]);

    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.rows[0].values[1], None);
    assert_eq!(table.rows[0].text[1], PLACEHOLDER);
}
