//! Persistence boundary of the training engine.
//!
//! The engine depends only on [`TrainingRepository`]; [`TrainingStore`]
//! is the SQLite implementation. Errors are returned as-is and never
//! retried.
//!
//! [`TrainingStore`]: crate::storage::TrainingStore

use chrono::NaiveDate;
use uuid::Uuid;

use crate::plans::TrainingPlan;
use crate::progression::ProgressionState;
use crate::rides::RideRecord;
use crate::storage::config::AthleteProfile;
use crate::storage::database::DatabaseError;

/// Storage operations the engine needs.
pub trait TrainingRepository {
    /// Insert or update an athlete profile.
    fn save_profile(&self, profile: &AthleteProfile) -> Result<(), DatabaseError>;

    /// Load an athlete profile.
    fn load_profile(&self, athlete_id: &Uuid) -> Result<Option<AthleteProfile>, DatabaseError>;

    /// Insert a ride, or replace it when the ID already exists.
    fn save_ride(&self, ride: &RideRecord) -> Result<(), DatabaseError>;

    /// Load a single ride.
    fn get_ride(&self, ride_id: &Uuid) -> Result<Option<RideRecord>, DatabaseError>;

    /// Rides on or after `since`, newest first.
    fn list_rides(&self, athlete_id: &Uuid, since: NaiveDate) -> Result<Vec<RideRecord>, DatabaseError>;

    /// Most recent ride carrying a difficulty rating.
    fn last_rated_ride(&self, athlete_id: &Uuid) -> Result<Option<RideRecord>, DatabaseError>;

    /// Total TSS of rides dated in `[start, end)`.
    fn sum_stress_in_window(
        &self,
        athlete_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, DatabaseError>;

    /// Store progression levels.
    fn save_progression(&self, athlete_id: &Uuid, state: &ProgressionState) -> Result<(), DatabaseError>;

    /// Load progression levels, `None` before the first save.
    fn load_progression(&self, athlete_id: &Uuid) -> Result<Option<ProgressionState>, DatabaseError>;

    /// Store `plan` as the athlete's active plan. Any previously active plan
    /// is deactivated in the same transaction.
    fn save_active_plan(&self, plan: &TrainingPlan) -> Result<(), DatabaseError>;

    /// Replace a stored plan with a newer revision. Never changes whether
    /// the plan is active.
    fn update_plan(&self, plan: &TrainingPlan) -> Result<(), DatabaseError>;

    /// Store a plan revision and, when given, the athlete's progression
    /// levels in one transaction. Either both are written or neither is.
    fn record_completion(
        &self,
        athlete_id: &Uuid,
        plan: &TrainingPlan,
        progression: Option<&ProgressionState>,
    ) -> Result<(), DatabaseError>;

    /// Load the athlete's active plan.
    fn load_active_plan(&self, athlete_id: &Uuid) -> Result<Option<TrainingPlan>, DatabaseError>;

    /// Deactivate every active plan of the athlete. Returns how many changed.
    fn deactivate_plans(&self, athlete_id: &Uuid) -> Result<usize, DatabaseError>;

    /// All plans of the athlete, newest first.
    fn list_plans(&self, athlete_id: &Uuid) -> Result<Vec<TrainingPlan>, DatabaseError>;
}
