//! On-disk persistence tests.

use chrono::NaiveDate;
use rideload::progression::{DifficultyRating, ProgressionState};
use rideload::rides::{RideEntry, RideRecord};
use rideload::storage::schema::CURRENT_VERSION;
use rideload::storage::{AthleteProfile, Database, TrainingRepository};
use rideload::workouts::WorkoutType;
use tempfile::TempDir;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_fresh_database_is_stamped() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("nested").join("rideload.db")).unwrap();
    assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rideload.db");
    let athlete = Uuid::new_v4();

    let ride = RideRecord::from_entry(
        athlete,
        RideEntry::new(date(2024, 6, 9), 90.0)
            .with_avg_power(180.0)
            .with_difficulty(DifficultyRating::Moderate),
        240,
    );
    let mut progression = ProgressionState::new();
    progression.apply_rating(WorkoutType::Threshold, DifficultyRating::Hard);

    {
        let db = Database::open(&path).unwrap();
        let store = db.training_store();
        store
            .save_profile(&AthleteProfile::new(athlete, 240).with_weight(68.5))
            .unwrap();
        store.save_ride(&ride).unwrap();
        store.save_progression(&athlete, &progression).unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
    let store = db.training_store();

    let profile = store.load_profile(&athlete).unwrap().unwrap();
    assert_eq!(profile.ftp_watts, 240);
    assert_eq!(profile.weight_kg, Some(68.5));

    let loaded = store.get_ride(&ride.id).unwrap().unwrap();
    assert_eq!(loaded.tss, ride.tss);
    assert_eq!(loaded.difficulty, Some(DifficultyRating::Moderate));

    assert_eq!(store.load_progression(&athlete).unwrap(), Some(progression));
}

#[test]
fn test_athletes_are_isolated() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(&dir.path().join("rideload.db")).unwrap();
    let store = db.training_store();
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let ride = RideRecord::from_entry(
        first,
        RideEntry::new(date(2024, 6, 9), 60.0).with_avg_power(200.0),
        200,
    );
    store.save_ride(&ride).unwrap();

    assert_eq!(store.list_rides(&first, date(2024, 6, 1)).unwrap().len(), 1);
    assert!(store.list_rides(&second, date(2024, 6, 1)).unwrap().is_empty());
    assert_eq!(
        store
            .sum_stress_in_window(&second, date(2024, 6, 3), date(2024, 6, 10))
            .unwrap(),
        0.0
    );
    assert_eq!(
        store
            .sum_stress_in_window(&first, date(2024, 6, 3), date(2024, 6, 10))
            .unwrap(),
        100.0
    );
}
