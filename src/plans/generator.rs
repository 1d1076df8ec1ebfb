//! Periodized plan generation.
//!
//! Lays out a multi-week calendar of workout assignments from a phase
//! template. Generation is deterministic for a given template, week count,
//! cadence and date; only the plan ID and creation timestamp vary.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use uuid::Uuid;

use super::phases::PhaseTemplate;
use super::types::{AssignmentStatus, PlanWeek, TrainingPlan, WorkoutAssignment};
use crate::workouts::WorkoutCatalog;

/// Fewest supported training days per week.
pub const MIN_DAYS_PER_WEEK: u8 = 3;
/// Most supported training days per week.
pub const MAX_DAYS_PER_WEEK: u8 = 6;
/// Every Nth week is a deload week.
pub const DELOAD_EVERY: u32 = 4;

/// Weekday offsets from Monday for a clamped days-per-week value.
pub fn day_slots(days_per_week: u8) -> &'static [i64] {
    match days_per_week.clamp(MIN_DAYS_PER_WEEK, MAX_DAYS_PER_WEEK) {
        3 => &[0, 2, 4],
        4 => &[0, 1, 3, 5],
        5 => &[0, 1, 2, 4, 5],
        _ => &[0, 1, 2, 3, 4, 5],
    }
}

/// First day of a plan generated on `today`: today if it is a Monday,
/// otherwise the next Monday.
pub fn plan_start_date(today: NaiveDate) -> NaiveDate {
    let from_monday = today.weekday().num_days_from_monday() as i64;
    if from_monday == 0 {
        today
    } else {
        today + Duration::days(7 - from_monday)
    }
}

/// Whether `week` (1-based) of a `weeks`-long plan uses the deload template.
pub fn is_deload_week(week: u32, weeks: u32, taper_final_week: bool) -> bool {
    week % DELOAD_EVERY == 0 || (taper_final_week && week == weeks)
}

/// Builds training plans against a workout catalog.
pub struct PlanGenerator<'a, C: WorkoutCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: WorkoutCatalog + ?Sized> PlanGenerator<'a, C> {
    /// Create a generator resolving TSS estimates from `catalog`.
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Generate an inactive revision-1 plan.
    pub fn generate(
        &self,
        athlete_id: Uuid,
        template: &PhaseTemplate,
        weeks: u32,
        days_per_week: u8,
        today: NaiveDate,
    ) -> TrainingPlan {
        let days_per_week = days_per_week.clamp(MIN_DAYS_PER_WEEK, MAX_DAYS_PER_WEEK);
        let slots = day_slots(days_per_week);
        let start_date = plan_start_date(today);

        let mut plan_weeks = Vec::with_capacity(weeks as usize);
        let mut total_tss = 0.0;

        for week in 1..=weeks {
            let is_deload = is_deload_week(week, weeks, template.taper_final_week);
            let week_start = start_date + Duration::weeks(week as i64 - 1);
            let workout_ids = template.week_template(days_per_week, is_deload);

            let mut assignments = Vec::with_capacity(slots.len());
            for (day, (offset, workout_id)) in slots.iter().zip(workout_ids).enumerate() {
                let tss_estimate = match self.catalog.lookup(workout_id) {
                    Some(workout) => workout.tss_estimate,
                    None => {
                        tracing::warn!("Unresolved workout {} in {} template", workout_id, template.phase);
                        0.0
                    }
                };
                total_tss += tss_estimate;

                assignments.push(WorkoutAssignment {
                    id: format!("w{}d{}", week, day + 1),
                    date: week_start + Duration::days(*offset),
                    workout_id: workout_id.clone(),
                    status: AssignmentStatus::Scheduled,
                    tss_estimate,
                });
            }

            plan_weeks.push(PlanWeek {
                week,
                is_deload,
                label: if is_deload {
                    "Deload".to_string()
                } else {
                    format!("Week {}", week)
                },
                week_start,
                assignments,
            });
        }

        let avg_weekly_tss = if weeks > 0 {
            (total_tss / weeks as f64).round()
        } else {
            0.0
        };

        tracing::debug!(
            "Generated {} plan: {} weeks x {} days, avg {} TSS/week",
            template.phase,
            weeks,
            days_per_week,
            avg_weekly_tss
        );

        TrainingPlan {
            id: Uuid::new_v4(),
            athlete_id,
            phase: template.phase,
            phase_label: template.label.clone(),
            start_date,
            weeks,
            days_per_week,
            avg_weekly_tss,
            plan_weeks,
            revision: 1,
            active: false,
            created_at: Utc::now(),
        }
    }
}
