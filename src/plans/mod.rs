//! Periodized training plans.
//!
//! Phase templates, the plan generator, and the plan value objects with
//! their assignment lifecycle.

pub mod generator;
pub mod phases;
pub mod types;

pub use generator::{day_slots, plan_start_date, PlanGenerator, MAX_DAYS_PER_WEEK, MIN_DAYS_PER_WEEK};
pub use phases::{BuiltInPhases, PhaseCatalog, PhaseTemplate};
pub use types::{AssignmentStatus, Phase, PlanError, PlanWeek, TrainingPlan, WorkoutAssignment};
