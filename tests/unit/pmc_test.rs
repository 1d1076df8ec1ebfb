//! Unit tests for the performance management model.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use rideload::metrics::analytics::{daily_stress, weekly_stress_sum, PerformanceManager};
use rideload::rides::{RideEntry, RideRecord};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_zero_input_gives_zero_series() {
    let pm = PerformanceManager::new();
    let series = pm.series(&BTreeMap::new(), date(2024, 3, 1), 60);

    assert_eq!(series.len(), 60);
    for point in &series {
        assert_eq!(point.ctl, 0.0);
        assert_eq!(point.atl, 0.0);
        assert_eq!(point.tsb, 0.0);
    }
}

#[test]
fn test_series_is_dense_and_ends_on_end_date() {
    let pm = PerformanceManager::new();
    let mut daily = BTreeMap::new();
    daily.insert(date(2024, 2, 20), 80.0);

    let series = pm.series(&daily, date(2024, 3, 1), 30);
    assert_eq!(series.last().unwrap().date, date(2024, 3, 1));
    for pair in series.windows(2) {
        assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
    }
}

#[test]
fn test_series_is_idempotent() {
    let pm = PerformanceManager::new();
    let mut daily = BTreeMap::new();
    for offset in [0, 2, 3, 7, 11, 12] {
        daily.insert(date(2024, 1, 1) + Duration::days(offset), 50.0 + offset as f64 * 7.0);
    }

    let first = pm.series(&daily, date(2024, 1, 31), 30);
    let second = pm.series(&daily, date(2024, 1, 31), 30);
    assert_eq!(first, second);
}

#[test]
fn test_ctl_decays_after_single_load() {
    let pm = PerformanceManager::new();
    let end = date(2024, 4, 30);
    let mut daily = BTreeMap::new();
    daily.insert(end - Duration::days(59), 300.0);

    let series = pm.series(&daily, end, 60);
    assert_eq!(series[0].tss, 300.0);
    for pair in series[1..].windows(2) {
        assert!(pair[1].ctl < pair[0].ctl);
        assert!(pair[1].ctl > 0.0);
    }
    assert!(series[1].ctl < series[0].ctl);
}

#[test]
fn test_form_uses_previous_day() {
    let pm = PerformanceManager::new();
    let end = date(2024, 5, 10);
    let mut daily = BTreeMap::new();
    daily.insert(end, 200.0);

    let series = pm.series(&daily, end, 2);
    let today = series[1];
    // No training before today, so form going into the day is zero
    assert_eq!(today.tsb, 0.0);
    assert!(today.ctl > 0.0);
    assert!(today.atl > today.ctl);
}

#[test]
fn test_priming_window_carries_earlier_load() {
    let pm = PerformanceManager::new();
    let end = date(2024, 5, 10);
    let mut daily = BTreeMap::new();
    // Before the 7-day window but inside the priming walk
    daily.insert(end - Duration::days(30), 150.0);

    let series = pm.series(&daily, end, 7);
    assert!(series[0].ctl > 0.0);
    assert!(series[0].atl > 0.0);
    assert!(series[0].tsb > 0.0);
}

#[test]
fn test_daily_stress_sums_same_day_rides() {
    let athlete = Uuid::new_v4();
    let rides = vec![
        RideRecord::from_entry(athlete, RideEntry::new(date(2024, 5, 1), 60.0).with_avg_power(200.0), 200),
        RideRecord::from_entry(athlete, RideEntry::new(date(2024, 5, 1), 30.0).with_avg_power(200.0), 200),
        RideRecord::from_entry(athlete, RideEntry::new(date(2024, 5, 2), 60.0), 200),
    ];

    let daily = daily_stress(&rides);
    assert_eq!(daily.get(&date(2024, 5, 1)), Some(&150.0));
    assert!(daily.get(&date(2024, 5, 2)).is_none());
    assert_eq!(weekly_stress_sum(&daily, date(2024, 4, 29)), 150.0);
}
