//! Unit tests for stress-unit calculations.

use chrono::NaiveDate;
use rideload::metrics::analytics::daily_stress;
use rideload::metrics::calculator::{
    compute_stress_units, intensity_factor, training_stress_score, watts_per_kg, RacerCategory,
};
use rideload::rides::{RideEntry, RideRecord};
use uuid::Uuid;

#[test]
fn test_intensity_factor_at_threshold_is_one() {
    for ftp in [50.0, 137.0, 200.0, 263.0, 410.0] {
        assert_eq!(intensity_factor(ftp, ftp), 1.0);
    }
}

#[test]
fn test_one_hour_at_threshold_is_100() {
    assert_eq!(training_stress_score(60.0, 200.0, 200.0), 100.0);
    assert_eq!(training_stress_score(60.0, 315.0, 315.0), 100.0);
}

#[test]
fn test_hour_at_110_percent() {
    let units = compute_stress_units(60.0, Some(220.0), 200.0).unwrap();
    assert_eq!(units.intensity_factor, 1.1);
    // 1 h x 220 W x 1.1 / 200 W x 100
    assert_eq!(units.tss, 121.0);
}

#[test]
fn test_tss_scales_with_duration_and_square_of_intensity() {
    // Half of threshold for an hour: 0.5^2 x 100
    assert_eq!(training_stress_score(60.0, 100.0, 200.0), 25.0);
    assert_eq!(training_stress_score(120.0, 100.0, 200.0), 50.0);
    assert_eq!(training_stress_score(30.0, 200.0, 200.0), 50.0);
}

#[test]
fn test_invalid_inputs_are_neutral() {
    assert_eq!(intensity_factor(200.0, 0.0), 0.0);
    assert_eq!(intensity_factor(200.0, -10.0), 0.0);
    assert_eq!(training_stress_score(60.0, 0.0, 200.0), 0.0);
    assert_eq!(training_stress_score(60.0, 200.0, 0.0), 0.0);
    assert_eq!(training_stress_score(60.0, -5.0, 200.0), 0.0);

    assert!(compute_stress_units(60.0, None, 200.0).is_none());
    assert!(compute_stress_units(60.0, Some(0.0), 200.0).is_none());
}

#[test]
fn test_non_positive_duration_scores_zero() {
    assert_eq!(training_stress_score(0.0, 220.0, 200.0), 0.0);
    assert_eq!(training_stress_score(-30.0, 200.0, 200.0), 0.0);
    assert_eq!(training_stress_score(f64::NAN, 200.0, 200.0), 0.0);

    let units = compute_stress_units(-60.0, Some(220.0), 200.0).unwrap();
    assert_eq!(units.tss, 0.0);
    assert_eq!(units.intensity_factor, 1.1);
}

#[test]
fn test_negative_duration_ride_adds_no_stress() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let ride = RideRecord::from_entry(
        Uuid::new_v4(),
        RideEntry::new(date, -60.0).with_avg_power(220.0),
        200,
    );
    assert_eq!(ride.tss, Some(0.0));

    let daily = daily_stress(std::slice::from_ref(&ride));
    assert!(daily.values().all(|tss| *tss >= 0.0));
}

#[test]
fn test_rounding() {
    // 233 / 250 = 0.932
    assert_eq!(intensity_factor(233.0, 250.0), 0.932);
    // 45 min at 180 W, FTP 250: 0.75 x 180 x 0.72 / 250 x 100 = 38.88
    assert_eq!(training_stress_score(45.0, 180.0, 250.0), 38.9);
}

#[test]
fn test_racer_categories() {
    assert_eq!(RacerCategory::from_wkg(2.0), RacerCategory::Recreational);
    assert_eq!(RacerCategory::from_wkg(2.5), RacerCategory::Cat4);
    assert_eq!(RacerCategory::from_wkg(3.5), RacerCategory::Cat3);
    assert_eq!(RacerCategory::from_wkg(4.6), RacerCategory::Cat1);
    assert_eq!(RacerCategory::from_wkg(6.0), RacerCategory::ProElite);

    assert_eq!(watts_per_kg(300, Some(75.0)), Some(4.0));
    assert_eq!(watts_per_kg(300, None), None);
    assert_eq!(watts_per_kg(300, Some(0.0)), None);
}
