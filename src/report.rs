//! Plain-text coach summary.
//!
//! Renders profile, fitness, progression, recent rides and the active plan
//! into one block of text for a human or an assistant to read.

use chrono::NaiveDate;

use crate::metrics::{FormStatus, PmcPoint, PowerZones};
use crate::plans::{PhaseTemplate, TrainingPlan};
use crate::progression::ProgressionState;
use crate::rides::RideRecord;
use crate::storage::AthleteProfile;
use crate::workouts::WorkoutCatalog;

/// Most rides listed in the summary.
pub const MAX_LISTED_RIDES: usize = 8;

/// Everything the summary is rendered from.
pub struct CoachSnapshot<'a> {
    pub profile: Option<&'a AthleteProfile>,
    /// Performance series, oldest first
    pub pmc: &'a [PmcPoint],
    pub progression: &'a ProgressionState,
    /// Recent rides, newest first
    pub recent_rides: &'a [RideRecord],
    pub history_days: i64,
    pub active_plan: Option<&'a TrainingPlan>,
    /// Template of the active plan's phase
    pub phase_template: Option<&'a PhaseTemplate>,
    /// Stress accumulated in the current week
    pub week_stress: f64,
    pub today: NaiveDate,
}

/// Render the summary.
pub fn coach_summary<C>(snapshot: &CoachSnapshot<'_>, catalog: &C) -> String
where
    C: WorkoutCatalog + ?Sized,
{
    let Some(profile) = snapshot.profile else {
        return "No cycling profile found. Set a threshold power (FTP) to start tracking \
                training load."
            .to_string();
    };

    let mut lines = vec!["=== CYCLING TRAINING PROFILE ===".to_string()];

    let weight = profile
        .weight_kg
        .map(|w| format!("{}kg", w))
        .unwrap_or_else(|| "N/A".to_string());
    let wkg = profile
        .watts_per_kg()
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string());
    let category = profile
        .racer_category()
        .map(|c| c.display_name())
        .unwrap_or("Unknown");
    lines.push(format!(
        "FTP: {}W | Weight: {} | W/kg: {} | Category: {}",
        profile.ftp_watts, weight, wkg, category
    ));

    lines.push(format!(
        "Zones: {}",
        PowerZones::from_ftp(profile.ftp_watts)
            .all_zones()
            .iter()
            .map(|z| format!("{} {}-{}W", z.zone, z.min_watts, z.max_watts))
            .collect::<Vec<_>>()
            .join(" | ")
    ));

    let tested = match profile.ftp_tested_date {
        Some(tested) => format!("{} ({} days ago)", tested, (snapshot.today - tested).num_days()),
        None => "unknown".to_string(),
    };
    lines.push(format!(
        "Athlete Type: {} | FTP Last Tested: {}",
        profile.athlete_type, tested
    ));
    if let Some(event) = &profile.goal_event {
        match profile.goal_date {
            Some(goal_date) => lines.push(format!("Goal: {} on {}", event, goal_date)),
            None => lines.push(format!("Goal: {}", event)),
        }
    }

    lines.push(String::new());
    lines.push("=== CURRENT FITNESS (PMC) ===".to_string());
    lines.extend(fitness_lines(snapshot.pmc));

    lines.push(String::new());
    lines.push("=== PROGRESSION LEVELS (1.0-10.0) ===".to_string());
    lines.push(
        snapshot
            .progression
            .levels()
            .iter()
            .map(|(workout_type, level)| format!("{}: {:.1}", workout_type.display_name(), level))
            .collect::<Vec<_>>()
            .join(" | "),
    );

    lines.push(String::new());
    lines.push(format!("=== RECENT RIDES (last {} days) ===", snapshot.history_days));
    if snapshot.recent_rides.is_empty() {
        lines.push("No rides logged yet.".to_string());
    }
    for ride in snapshot.recent_rides.iter().take(MAX_LISTED_RIDES) {
        lines.push(ride_line(ride, catalog));
    }

    lines.push(String::new());
    lines.push("=== ACTIVE TRAINING PLAN ===".to_string());
    match snapshot.active_plan {
        Some(plan) => lines.extend(plan_lines(plan, snapshot)),
        None => lines.push("No active training plan.".to_string()),
    }

    lines.join("\n")
}

fn fitness_lines(pmc: &[PmcPoint]) -> Vec<String> {
    let (ctl, atl, tsb) = pmc
        .last()
        .map(|p| (p.ctl, p.atl, p.tsb))
        .unwrap_or((0.0, 0.0, 0.0));
    let ctl_week_ago = if pmc.len() >= 8 {
        pmc[pmc.len() - 8].ctl
    } else {
        0.0
    };

    vec![
        format!("CTL (Fitness): {:.1} TSS (7d trend: {:+.1})", ctl, ctl - ctl_week_ago),
        format!("ATL (Fatigue): {:.1} TSS", atl),
        format!(
            "TSB (Form):    {:+.1} - {}",
            tsb,
            FormStatus::from_tsb(tsb).recommendation()
        ),
    ]
}

fn ride_line<C>(ride: &RideRecord, catalog: &C) -> String
where
    C: WorkoutCatalog + ?Sized,
{
    let mut line = format!(
        "{} | {}min | IF={:.2} | TSS={:.0}",
        ride.ride_date,
        ride.duration_minutes,
        ride.intensity_factor.unwrap_or(0.0),
        ride.tss.unwrap_or(0.0)
    );
    if let Some(workout) = ride.workout_id.as_deref().and_then(|id| catalog.lookup(id)) {
        line.push_str(&format!(" | {}", workout.name));
    }
    if let Some(rating) = ride.difficulty {
        line.push_str(&format!(" | Survey: {}/5", rating.value()));
    }
    line
}

fn plan_lines(plan: &TrainingPlan, snapshot: &CoachSnapshot<'_>) -> Vec<String> {
    let elapsed_weeks = ((snapshot.today - plan.start_date).num_days().max(0) / 7) as u32;
    let current_week = (elapsed_weeks + 1).min(plan.weeks);

    let mut lines = vec![format!(
        "{}, Week {}/{}, {} days/week",
        plan.phase_label, current_week, plan.weeks, plan.days_per_week
    )];
    if let Some(template) = snapshot.phase_template {
        let (low, high) = template.weekly_stress_range;
        lines.push(format!("Target TSS: {}-{}/wk", low, high));
    }
    lines.push(format!("Plan average: {:.0} TSS/wk", plan.avg_weekly_tss));
    lines.push(format!("This week actual TSS: {:.0}", snapshot.week_stress));
    lines
}
