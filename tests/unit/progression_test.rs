//! Unit tests for progression levels.

use rideload::progression::{step_level, DifficultyRating, ProgressionState, MAX_LEVEL, MIN_LEVEL};
use rideload::workouts::WorkoutType;

fn all_ratings() -> Vec<DifficultyRating> {
    (1..=5u8)
        .map(|v| DifficultyRating::try_from(v).unwrap())
        .collect()
}

#[test]
fn test_levels_stay_in_range_for_every_rating() {
    for start in [1.0, 1.2, 4.7, 9.0, 9.8, 10.0] {
        for rating in all_ratings() {
            let level = step_level(start, rating.progression_delta());
            assert!((MIN_LEVEL..=MAX_LEVEL).contains(&level));
            assert!(level >= start);
        }
    }
}

#[test]
fn test_repeated_all_out_from_9_8_never_exceeds_max() {
    let mut state = ProgressionState::from_levels(vec![(WorkoutType::Anaerobic, 9.8)]);
    for _ in 0..10 {
        let level = state
            .apply_rating(WorkoutType::Anaerobic, DifficultyRating::AllOut)
            .unwrap();
        assert!(level <= MAX_LEVEL);
    }
    assert_eq!(state.level(WorkoutType::Anaerobic), Some(MAX_LEVEL));
}

#[test]
fn test_large_negative_feedback_never_drops_below_min() {
    let mut level = 1.2;
    for _ in 0..10 {
        level = step_level(level, -20.0);
        assert!(level >= MIN_LEVEL);
    }
    assert_eq!(level, MIN_LEVEL);
}

#[test]
fn test_rating_sequence() {
    let mut state = ProgressionState::new();
    state.apply_rating(WorkoutType::SweetSpot, DifficultyRating::Easy);
    state.apply_rating(WorkoutType::SweetSpot, DifficultyRating::Hard);

    // 1.0 + 1.3 + 1.1
    let level = state.level(WorkoutType::SweetSpot).unwrap();
    assert!((level - 3.4).abs() < 1e-9);
}

#[test]
fn test_room_to_grow_order() {
    let state = ProgressionState::from_levels(vec![
        (WorkoutType::Endurance, 5.0),
        (WorkoutType::Tempo, 2.0),
        (WorkoutType::SweetSpot, 3.0),
        (WorkoutType::Threshold, 2.0),
        (WorkoutType::Vo2max, 8.0),
        (WorkoutType::Anaerobic, 1.5),
    ]);

    let order: Vec<WorkoutType> = state.by_room_to_grow().into_iter().map(|(t, _)| t).collect();
    assert_eq!(
        order,
        vec![
            WorkoutType::Anaerobic,
            WorkoutType::Tempo,
            WorkoutType::Threshold,
            WorkoutType::SweetSpot,
            WorkoutType::Endurance,
            WorkoutType::Vo2max,
        ]
    );
}
