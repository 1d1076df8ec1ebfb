//! Unit tests for plan generation.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rideload::plans::{BuiltInPhases, Phase, PhaseCatalog, PlanGenerator, TrainingPlan};
use rideload::workouts::BuiltInCatalog;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn generate(phase: Phase, weeks: u32, days: u8, today: NaiveDate) -> TrainingPlan {
    let catalog = BuiltInCatalog::new();
    let phases = BuiltInPhases::new();
    PlanGenerator::new(&catalog).generate(
        Uuid::nil(),
        phases.template(phase).unwrap(),
        weeks,
        days,
        today,
    )
}

fn layout(plan: &TrainingPlan) -> Vec<(String, NaiveDate, String)> {
    plan.assignments()
        .map(|a| (a.id.clone(), a.date, a.workout_id.clone()))
        .collect()
}

#[test]
fn test_base_4x4_is_deterministic() {
    let today = date(2024, 9, 12);
    let first = generate(Phase::Base, 4, 4, today);
    let second = generate(Phase::Base, 4, 4, today);

    assert_eq!(layout(&first), layout(&second));
    assert_eq!(first.assignments().count(), 16);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_start_is_next_monday_from_any_weekday() {
    let monday = date(2024, 9, 9);
    for offset in 0..7 {
        let today = monday + Duration::days(offset);
        let plan = generate(Phase::Base, 1, 3, today);

        assert_eq!(plan.start_date.weekday(), Weekday::Mon);
        assert!(plan.start_date >= today);
        assert!(plan.start_date - today < Duration::days(7));
    }
}

#[test]
fn test_deload_weeks_without_taper() {
    for phase in [Phase::Base, Phase::Build] {
        let plan = generate(phase, 8, 4, date(2024, 9, 9));
        let deloads: Vec<u32> = plan
            .plan_weeks
            .iter()
            .filter(|w| w.is_deload)
            .map(|w| w.week)
            .collect();
        assert_eq!(deloads, vec![4, 8]);
    }
}

#[test]
fn test_taper_adds_final_week() {
    let plan = generate(Phase::Specialty, 5, 4, date(2024, 9, 9));
    let deloads: Vec<u32> = plan
        .plan_weeks
        .iter()
        .filter(|w| w.is_deload)
        .map(|w| w.week)
        .collect();
    assert_eq!(deloads, vec![4, 5]);
}

#[test]
fn test_weekday_offsets_per_cadence() {
    let expected: [(u8, Vec<Weekday>); 4] = [
        (3, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]),
        (4, vec![Weekday::Mon, Weekday::Tue, Weekday::Thu, Weekday::Sat]),
        (5, vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Fri, Weekday::Sat]),
        (
            6,
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
            ],
        ),
    ];

    for (days, weekdays) in expected {
        let plan = generate(Phase::Build, 2, days, date(2024, 9, 9));
        for week in &plan.plan_weeks {
            let actual: Vec<Weekday> = week.assignments.iter().map(|a| a.date.weekday()).collect();
            assert_eq!(actual, weekdays);
        }
    }
}

#[test]
fn test_weeks_are_consecutive() {
    let plan = generate(Phase::Base, 6, 5, date(2024, 9, 10));
    for pair in plan.plan_weeks.windows(2) {
        assert_eq!(pair[1].week_start - pair[0].week_start, Duration::days(7));
        assert_eq!(pair[1].week, pair[0].week + 1);
    }
}

#[test]
fn test_deload_week_is_lighter() {
    let plan = generate(Phase::Build, 4, 4, date(2024, 9, 9));
    let week_tss = |n: usize| -> f64 {
        plan.plan_weeks[n]
            .assignments
            .iter()
            .map(|a| a.tss_estimate)
            .sum()
    };
    assert!(week_tss(3) < week_tss(0));
}
