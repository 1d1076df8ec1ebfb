//! Training plan types.
//!
//! A plan is an immutable value. Completing or rescheduling an assignment
//! yields a new plan revision; the previous value is left untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Periodization phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Aerobic base building
    Base,
    /// Threshold and VO2max build
    Build,
    /// Event-specific sharpening with a taper
    Specialty,
}

impl Phase {
    /// Storage key.
    pub fn key(&self) -> &'static str {
        match self {
            Phase::Base => "base",
            Phase::Build => "build",
            Phase::Specialty => "specialty",
        }
    }

    /// Get all phases.
    pub fn all() -> Vec<Phase> {
        vec![Phase::Base, Phase::Build, Phase::Specialty]
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Phase::Base),
            "build" => Ok(Phase::Build),
            "specialty" => Ok(Phase::Specialty),
            _ => Err(format!("Unknown phase: {}", s)),
        }
    }
}

/// Lifecycle status of a plan assignment.
///
/// Overdue is derived from the date, not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Scheduled,
    Completed,
    Rescheduled,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Scheduled => write!(f, "scheduled"),
            AssignmentStatus::Completed => write!(f, "completed"),
            AssignmentStatus::Rescheduled => write!(f, "rescheduled"),
        }
    }
}

/// One workout placed on the plan calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAssignment {
    /// Plan-local ID ("w{week}d{day}")
    pub id: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Catalog workout ID
    pub workout_id: String,
    /// Lifecycle status
    pub status: AssignmentStatus,
    /// TSS estimate copied from the catalog (0 when unresolved)
    pub tss_estimate: f64,
}

impl WorkoutAssignment {
    /// Still scheduled and dated before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == AssignmentStatus::Scheduled && self.date < today
    }
}

/// One week of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWeek {
    /// 1-based week number
    pub week: u32,
    /// Uses the reduced-load template
    pub is_deload: bool,
    /// Display label
    pub label: String,
    /// Monday of the week
    pub week_start: NaiveDate,
    /// Assignments in day order
    pub assignments: Vec<WorkoutAssignment>,
}

/// A generated multi-week plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Unique identifier
    pub id: Uuid,
    /// Owning athlete
    pub athlete_id: Uuid,
    /// Phase template the plan was generated from
    pub phase: Phase,
    /// Phase display label
    pub phase_label: String,
    /// First day of week 1
    pub start_date: NaiveDate,
    /// Number of weeks
    pub weeks: u32,
    /// Training days per week
    pub days_per_week: u8,
    /// Average estimated TSS per week
    pub avg_weekly_tss: f64,
    /// Weeks in order
    pub plan_weeks: Vec<PlanWeek>,
    /// Revision counter, bumped on every assignment change
    pub revision: u32,
    /// Whether this is the athlete's active plan
    pub active: bool,
    /// Generation timestamp
    pub created_at: DateTime<Utc>,
}

impl TrainingPlan {
    /// All assignments in calendar order of generation.
    pub fn assignments(&self) -> impl Iterator<Item = &WorkoutAssignment> {
        self.plan_weeks.iter().flat_map(|w| w.assignments.iter())
    }

    /// Find an assignment by plan-local ID.
    pub fn assignment(&self, id: &str) -> Option<&WorkoutAssignment> {
        self.assignments().find(|a| a.id == id)
    }

    /// Week number (1-based) that contains `today`, if within the plan.
    pub fn week_number_on(&self, today: NaiveDate) -> Option<u32> {
        let days = (today - self.start_date).num_days();
        if days < 0 {
            return None;
        }
        let week = (days / 7) as u32 + 1;
        (week <= self.weeks).then_some(week)
    }

    /// Assignments of the week containing `today`.
    pub fn week_assignments(&self, today: NaiveDate) -> Vec<WorkoutAssignment> {
        self.week_number_on(today)
            .and_then(|n| self.plan_weeks.iter().find(|w| w.week == n))
            .map(|w| w.assignments.clone())
            .unwrap_or_default()
    }

    /// Scheduled assignments dated before `today`.
    pub fn overdue(&self, today: NaiveDate) -> Vec<&WorkoutAssignment> {
        self.assignments().filter(|a| a.is_overdue(today)).collect()
    }

    /// Total estimated TSS of all assignments.
    pub fn total_tss(&self) -> f64 {
        self.assignments().map(|a| a.tss_estimate).sum()
    }

    /// New revision with the assignment marked completed.
    pub fn with_completed(&self, id: &str) -> Result<TrainingPlan, PlanError> {
        self.revise(id, |assignment| {
            if assignment.status == AssignmentStatus::Completed {
                return Err(PlanError::InvalidTransition {
                    id: assignment.id.clone(),
                    status: assignment.status,
                });
            }
            assignment.status = AssignmentStatus::Completed;
            Ok(())
        })
    }

    /// New revision with the assignment moved to `new_date`.
    pub fn with_rescheduled(&self, id: &str, new_date: NaiveDate) -> Result<TrainingPlan, PlanError> {
        self.revise(id, |assignment| {
            if assignment.status == AssignmentStatus::Completed {
                return Err(PlanError::InvalidTransition {
                    id: assignment.id.clone(),
                    status: assignment.status,
                });
            }
            assignment.date = new_date;
            assignment.status = AssignmentStatus::Rescheduled;
            Ok(())
        })
    }

    fn revise<F>(&self, id: &str, change: F) -> Result<TrainingPlan, PlanError>
    where
        F: FnOnce(&mut WorkoutAssignment) -> Result<(), PlanError>,
    {
        let mut next = self.clone();
        let assignment = next
            .plan_weeks
            .iter_mut()
            .flat_map(|w| w.assignments.iter_mut())
            .find(|a| a.id == id)
            .ok_or_else(|| PlanError::AssignmentNotFound(id.to_string()))?;

        change(assignment)?;
        next.revision = self.revision + 1;
        Ok(next)
    }
}

/// Plan mutation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("Assignment not found: {0}")]
    AssignmentNotFound(String),

    #[error("Assignment {id} is {status} and cannot change")]
    InvalidTransition { id: String, status: AssignmentStatus },
}
