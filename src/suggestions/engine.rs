//! Adaptive suggestion rules.
//!
//! A stateless evaluator over a read snapshot: the last rated ride, the
//! current week's stress, and the active plan. It never mutates anything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plans::TrainingPlan;
use crate::progression::DifficultyRating;
use crate::rides::RideRecord;
use crate::workouts::WorkoutCatalog;

/// Weekly target used when the plan carries no average.
pub const DEFAULT_WEEKLY_TARGET: f64 = 400.0;
/// Weekly stress may exceed the target by this factor before a recovery
/// day is suggested.
pub const OVERLOAD_FACTOR: f64 = 1.1;
/// Most suggestions returned by one evaluation.
pub const MAX_SUGGESTIONS: usize = 4;

/// What a suggestion recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Step up to a harder variant
    Upgrade,
    /// Rest or recover before the next hard session
    Rest,
    /// Weekly load is over target
    RecoveryDay,
    /// A scheduled workout was missed
    Reschedule,
}

impl SuggestionKind {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SuggestionKind::Upgrade => "Upgrade",
            SuggestionKind::Rest => "Rest",
            SuggestionKind::RecoveryDay => "Recovery Day",
            SuggestionKind::Reschedule => "Reschedule",
        }
    }
}

/// One advisory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    /// Plan assignment the suggestion refers to
    pub assignment_id: Option<String>,
}

impl Suggestion {
    fn new(kind: SuggestionKind, message: String) -> Self {
        Self {
            kind,
            message,
            assignment_id: None,
        }
    }
}

/// Snapshot the rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    /// Most recent ride carrying a difficulty rating
    pub last_rated_ride: Option<&'a RideRecord>,
    /// Stress accumulated in the Monday-anchored week containing `today`
    pub weekly_stress: f64,
    /// Active plan, if any
    pub active_plan: Option<&'a TrainingPlan>,
    pub today: NaiveDate,
}

/// Evaluate all rules in order, capped at [`MAX_SUGGESTIONS`].
pub fn evaluate<C>(ctx: &SuggestionContext<'_>, catalog: &C) -> Vec<Suggestion>
where
    C: WorkoutCatalog + ?Sized,
{
    let mut suggestions = Vec::new();

    if let Some(suggestion) = feedback_rule(ctx.last_rated_ride, catalog) {
        suggestions.push(suggestion);
    }

    if let Some(plan) = ctx.active_plan {
        if let Some(suggestion) = load_rule(ctx.weekly_stress, plan) {
            suggestions.push(suggestion);
        }
        suggestions.extend(overdue_rule(plan, ctx.today, catalog));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Upgrade after an easy session of a known type, rest after an all-out one.
fn feedback_rule<C>(ride: Option<&RideRecord>, catalog: &C) -> Option<Suggestion>
where
    C: WorkoutCatalog + ?Sized,
{
    let ride = ride?;
    let rating = ride.difficulty?;

    if rating.is_easy() {
        let workout = ride.workout_id.as_deref().and_then(|id| catalog.lookup(id))?;
        return Some(Suggestion::new(
            SuggestionKind::Upgrade,
            format!(
                "Your last {} workout felt {}. Consider stepping up to a harder variant next session.",
                workout.workout_type.key(),
                rating.label().to_lowercase()
            ),
        ));
    }

    (rating == DifficultyRating::AllOut).then(|| {
        Suggestion::new(
            SuggestionKind::Rest,
            "Your last ride was an all-out effort. Prioritise rest or an easy recovery spin \
             before your next hard session."
                .to_string(),
        )
    })
}

fn load_rule(weekly_stress: f64, plan: &TrainingPlan) -> Option<Suggestion> {
    let target = if plan.avg_weekly_tss > 0.0 {
        plan.avg_weekly_tss
    } else {
        DEFAULT_WEEKLY_TARGET
    };

    (weekly_stress > target * OVERLOAD_FACTOR).then(|| {
        Suggestion::new(
            SuggestionKind::RecoveryDay,
            format!(
                "You've accumulated {:.0} TSS this week, above your target of {:.0} TSS. \
                 Consider a recovery spin or rest day.",
                weekly_stress, target
            ),
        )
    })
}

fn overdue_rule<C>(plan: &TrainingPlan, today: NaiveDate, catalog: &C) -> Vec<Suggestion>
where
    C: WorkoutCatalog + ?Sized,
{
    plan.overdue(today)
        .into_iter()
        .map(|assignment| {
            let name = catalog
                .lookup(&assignment.workout_id)
                .map(|w| w.name.as_str())
                .unwrap_or(assignment.workout_id.as_str());
            Suggestion {
                kind: SuggestionKind::Reschedule,
                message: format!(
                    "Missed workout: {} scheduled for {}. Reschedule or mark as skipped.",
                    name, assignment.date
                ),
                assignment_id: Some(assignment.id.clone()),
            }
        })
        .collect()
}
