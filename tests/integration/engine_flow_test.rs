//! End-to-end flows through the training engine on an in-memory database.

use chrono::NaiveDate;
use rideload::engine::{EngineError, TrainingEngine};
use rideload::plans::{AssignmentStatus, Phase, PlanError};
use rideload::progression::DifficultyRating;
use rideload::rides::RideEntry;
use rideload::storage::{AthleteProfile, Database, TrainingStore};
use rideload::suggestions::SuggestionKind;
use rideload::workouts::WorkoutType;
use rideload::FixedClock;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engine_on(db: &Database, today: NaiveDate) -> TrainingEngine<TrainingStore<'_>> {
    TrainingEngine::new(TrainingStore::new(db.connection())).with_clock(FixedClock(today))
}

// Monday
fn plan_day() -> NaiveDate {
    date(2024, 6, 10)
}

#[test]
fn test_profile_and_ride_logging() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();

    let saved = engine
        .save_profile(AthleteProfile::new(athlete, 250).with_weight(75.0))
        .unwrap();
    assert_eq!(saved.ftp_tested_date, Some(plan_day()));
    assert_eq!(engine.threshold_power(&athlete).unwrap(), 250);

    let ride = engine
        .log_ride(
            &athlete,
            RideEntry::new(date(2024, 6, 8), 60.0).with_avg_power(275.0),
        )
        .unwrap();
    assert_eq!(ride.intensity_factor, Some(1.1));
    assert_eq!(ride.tss, Some(121.0));

    let history = engine.ride_history(&athlete, 28).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, ride.id);

    let amended = engine
        .amend_ride(
            &ride.id,
            RideEntry::new(date(2024, 6, 8), 120.0).with_avg_power(250.0),
        )
        .unwrap();
    assert_eq!(amended.id, ride.id);
    assert_eq!(amended.tss, Some(200.0));
    assert_eq!(engine.ride_history(&athlete, 28).unwrap().len(), 1);
}

#[test]
fn test_performance_series_reflects_rides() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();
    engine.save_profile(AthleteProfile::new(athlete, 200)).unwrap();

    engine
        .log_ride(&athlete, RideEntry::new(date(2024, 6, 9), 60.0).with_avg_power(200.0))
        .unwrap();

    let series = engine.performance_series(&athlete, 14).unwrap();
    assert_eq!(series.len(), 14);
    assert_eq!(series.last().unwrap().date, plan_day());

    let ride_day = series.iter().find(|p| p.date == date(2024, 6, 9)).unwrap();
    assert!(ride_day.ctl > 0.0);
    assert!(ride_day.atl > ride_day.ctl);
    // Form lags fitness and fatigue by a day
    assert_eq!(ride_day.tsb, 0.0);
    assert!(series.last().unwrap().tsb < 0.0);
}

#[test]
fn test_plan_lifecycle() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();

    let generated = engine.generate_plan(&athlete, Phase::Base, 8, 4).unwrap();
    assert!(!generated.active);
    assert!(engine.active_plan(&athlete).unwrap().is_none());

    let first = engine.save_plan(&generated).unwrap();
    assert!(first.active);
    assert_eq!(first.start_date, plan_day());
    assert_eq!(first.avg_weekly_tss, 181.0);

    let week: Vec<String> = engine
        .this_week_assignments(&athlete)
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(week, vec!["w1d1", "w1d2", "w1d3", "w1d4"]);

    let second = engine
        .save_plan(&engine.generate_plan(&athlete, Phase::Build, 6, 5).unwrap())
        .unwrap();
    let active = engine.active_plan(&athlete).unwrap().unwrap();
    assert_eq!(active.id, second.id);

    let history = engine.plan_history(&athlete).unwrap();
    assert_eq!(history.len(), 2);
    let old = history.iter().find(|p| p.id == first.id).unwrap();
    assert!(!old.active);
    assert_eq!(history.iter().filter(|p| p.active).count(), 1);

    assert!(engine.deactivate_plan(&athlete).unwrap());
    assert!(engine.active_plan(&athlete).unwrap().is_none());
    assert!(!engine.deactivate_plan(&athlete).unwrap());
}

#[test]
fn test_complete_assignment_updates_progression() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();
    engine
        .save_plan(&engine.generate_plan(&athlete, Phase::Base, 4, 4).unwrap())
        .unwrap();

    // w1d2 is endurance_60
    let revised = engine
        .complete_assignment(&athlete, "w1d2", DifficultyRating::Easy)
        .unwrap()
        .unwrap();
    assert_eq!(revised.revision, 2);
    assert_eq!(
        revised.assignment("w1d2").unwrap().status,
        AssignmentStatus::Completed
    );

    let stored = engine.active_plan(&athlete).unwrap().unwrap();
    assert_eq!(stored.revision, 2);

    let progression = engine.progression(&athlete).unwrap();
    let endurance = progression.level(WorkoutType::Endurance).unwrap();
    assert!((endurance - 2.3).abs() < 1e-9);
    assert_eq!(progression.level(WorkoutType::SweetSpot), Some(1.0));

    // Recovery is not a tracked system
    engine
        .complete_assignment(&athlete, "w1d1", DifficultyRating::VeryEasy)
        .unwrap();
    assert_eq!(engine.progression(&athlete).unwrap(), progression);

    assert!(matches!(
        engine.complete_assignment(&athlete, "w1d2", DifficultyRating::Hard),
        Err(EngineError::Plan(PlanError::InvalidTransition { .. }))
    ));
    assert!(matches!(
        engine.complete_assignment(&athlete, "w9d9", DifficultyRating::Hard),
        Err(EngineError::Plan(PlanError::AssignmentNotFound(_)))
    ));
    assert_eq!(engine.active_plan(&athlete).unwrap().unwrap().revision, 3);
}

#[test]
fn test_suggested_workout_targets_lowest_system() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();

    // Fresh athlete: every system at 1.0, endurance wins the tie
    let workout = engine.suggest_workout(&athlete).unwrap().unwrap();
    assert_eq!(workout.id, "endurance_60");

    engine
        .save_plan(&engine.generate_plan(&athlete, Phase::Base, 4, 4).unwrap())
        .unwrap();
    engine
        .complete_assignment(&athlete, "w1d2", DifficultyRating::Moderate)
        .unwrap();

    let workout = engine.suggest_workout(&athlete).unwrap().unwrap();
    assert_eq!(workout.workout_type, WorkoutType::Tempo);
}

#[test]
fn test_overdue_assignments_until_handled() {
    let db = Database::open_in_memory().unwrap();
    let monday = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();
    monday
        .save_plan(&monday.generate_plan(&athlete, Phase::Base, 4, 4).unwrap())
        .unwrap();
    assert!(monday.suggestions(&athlete).unwrap().is_empty());

    let wednesday = engine_on(&db, date(2024, 6, 12));
    let suggestions = wednesday.suggestions(&athlete).unwrap();
    assert_eq!(suggestions.len(), 2);
    assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Reschedule));
    assert_eq!(suggestions[0].assignment_id.as_deref(), Some("w1d1"));
    assert_eq!(
        suggestions[1].message,
        "Missed workout: Carson -4 scheduled for 2024-06-11. Reschedule or mark as skipped."
    );

    wednesday
        .complete_assignment(&athlete, "w1d1", DifficultyRating::Moderate)
        .unwrap();
    let moved = wednesday
        .reschedule_assignment(&athlete, "w1d2", date(2024, 6, 14))
        .unwrap()
        .unwrap();
    assert_eq!(moved.assignment("w1d2").unwrap().status, AssignmentStatus::Rescheduled);
    assert_eq!(moved.revision, 3);

    assert!(wednesday.suggestions(&athlete).unwrap().is_empty());
}

#[test]
fn test_feedback_and_load_suggestions() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, date(2024, 6, 13));
    let athlete = Uuid::new_v4();
    engine.save_profile(AthleteProfile::new(athlete, 250)).unwrap();

    engine
        .log_ride(
            &athlete,
            RideEntry::new(date(2024, 6, 12), 60.0)
                .with_avg_power(220.0)
                .with_workout("ss_60_2x15")
                .with_difficulty(DifficultyRating::Easy),
        )
        .unwrap();

    let suggestions = engine.suggestions(&athlete).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, SuggestionKind::Upgrade);
    assert!(suggestions[0].message.contains("sweet_spot workout felt easy"));

    // Plan starts next Monday, nothing overdue yet
    engine
        .save_plan(&engine.generate_plan(&athlete, Phase::Base, 8, 4).unwrap())
        .unwrap();
    engine
        .log_ride(&athlete, RideEntry::new(date(2024, 6, 10), 120.0).with_avg_power(250.0))
        .unwrap();
    engine
        .log_ride(
            &athlete,
            RideEntry::new(date(2024, 6, 13), 30.0)
                .with_avg_power(200.0)
                .with_difficulty(DifficultyRating::AllOut),
        )
        .unwrap();

    let kinds: Vec<SuggestionKind> = engine
        .suggestions(&athlete)
        .unwrap()
        .into_iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(kinds, vec![SuggestionKind::Rest, SuggestionKind::RecoveryDay]);
}

#[test]
fn test_coach_summary() {
    let db = Database::open_in_memory().unwrap();
    let engine = engine_on(&db, plan_day());
    let athlete = Uuid::new_v4();

    assert!(engine
        .coach_summary(&athlete)
        .unwrap()
        .starts_with("No cycling profile found"));

    engine
        .save_profile(AthleteProfile::new(athlete, 280).with_weight(70.0))
        .unwrap();
    engine
        .log_ride(
            &athlete,
            RideEntry::new(date(2024, 6, 10), 60.0)
                .with_avg_power(252.0)
                .with_workout("ss_60_2x15")
                .with_difficulty(DifficultyRating::Hard),
        )
        .unwrap();
    engine
        .save_plan(&engine.generate_plan(&athlete, Phase::Base, 8, 4).unwrap())
        .unwrap();

    let text = engine.coach_summary(&athlete).unwrap();
    assert!(text.contains("FTP: 280W | Weight: 70kg | W/kg: 4.00 | Category: Cat 2"));
    assert!(text.contains("FTP Last Tested: 2024-06-10 (0 days ago)"));
    assert!(text.contains("=== RECENT RIDES (last 28 days) ==="));
    assert!(text.contains("2024-06-10 | 60min | IF=0.90 | TSS=81 | Antelope | Survey: 4/5"));
    assert!(text.contains("Base Phase, Week 1/8, 4 days/week"));
    assert!(text.contains("Target TSS: 300-450/wk"));
    assert!(text.contains("This week actual TSS: 81"));
}
