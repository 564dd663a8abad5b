//! Behavior-driven tests for anomaly listings and series summaries
//!
//! These tests verify WHAT a consumer of analyzed records can extract:
//! the flagged rows and a snapshot of the latest day.

use sigmascan_core::{anomalies, analyze, summarize, Metric, Observation, TradingDate};

fn observations(rows: &[(&str, f64, f64, f64)]) -> Vec<Observation> {
    rows.iter()
        .map(|(date, price, market_cap, volume)| {
            Observation::new(
                TradingDate::parse(date).expect("valid date"),
                *price,
                *market_cap,
                *volume,
            )
            .expect("valid observation")
        })
        .collect()
}

fn spiking_series() -> Vec<Observation> {
    observations(&[
        ("2024-06-01", 100.0, 1_000.0, 50.0),
        ("2024-06-02", 100.0, 1_000.0, 50.0),
        ("2024-06-03", 100.0, 1_000.0, 50.0),
        ("2024-06-04", 130.0, 1_000.0, 50.0),
        ("2024-06-05", 100.0, 1_000.0, 50.0),
        ("2024-06-06", 100.0, 1_000.0, 400.0),
    ])
}

// =============================================================================
// Summary: Anomaly listing
// =============================================================================

#[test]
fn anomaly_listing_contains_only_flagged_metric_days() {
    // Given: A series with a price spike and, later, a volume spike
    let records = analyze(&spiking_series(), 1.5, 7).expect("valid input");

    // When: The anomalies are listed
    let hits = anomalies(&records);

    // Then: Each hit corresponds to a flagged (day, metric) pair, in series order
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].date.to_string(), "2024-06-04");
    assert_eq!(hits[0].metric, Metric::Price);
    assert_eq!(hits[0].value, 130.0);
    assert_eq!(hits[0].z_score, Some(1.73));

    assert_eq!(hits[1].date.to_string(), "2024-06-06");
    assert_eq!(hits[1].metric, Metric::Volume);
    assert_eq!(hits[1].value, 400.0);

    // And: Every listed hit is flagged on its record
    for hit in &hits {
        let record = records
            .iter()
            .find(|record| record.date() == hit.date)
            .expect("hit refers to a record");
        assert!(record.is_anomaly(hit.metric));
    }
}

#[test]
fn anomaly_listing_serializes_metric_names() {
    let records = analyze(&spiking_series(), 1.5, 7).expect("valid input");
    let value = serde_json::to_value(anomalies(&records)).expect("serializable");
    assert_eq!(value[0]["metric"], "price");
    assert_eq!(value[1]["metric"], "volume");
}

// =============================================================================
// Summary: Latest-day snapshot
// =============================================================================

#[test]
fn summary_reports_latest_day_changes_and_counts() {
    // Given: An analyzed series
    let records = analyze(&spiking_series(), 1.5, 7).expect("valid input");

    // When: It is summarized
    let summary = summarize(&records).expect("non-empty series");

    // Then: The latest observation and day-over-day changes are reported
    assert_eq!(summary.days, 6);
    assert_eq!(summary.first_date.to_string(), "2024-06-01");
    assert_eq!(summary.latest.date().to_string(), "2024-06-06");

    let volume = summary.metric(Metric::Volume).expect("volume summary");
    assert_eq!(volume.latest, 400.0);
    assert_eq!(volume.change_pct, Some(700.0));
    assert_eq!(volume.anomaly_count, 1);

    let price = summary.metric(Metric::Price).expect("price summary");
    assert_eq!(price.change_pct, Some(0.0));
    assert_eq!(price.anomaly_count, 1);

    // And: Days with any flagged metric are counted once
    assert_eq!(summary.anomalous_days, 2);
}

#[test]
fn single_day_summary_has_no_change() {
    let records = analyze(
        &observations(&[("2024-06-01", 5.0, 10.0, 1.0)]),
        1.5,
        7,
    )
    .expect("valid input");

    let summary = summarize(&records).expect("non-empty series");
    assert!(summary.metrics.iter().all(|metric| metric.change_pct.is_none()));
    assert_eq!(summary.anomalous_days, 0);
}
