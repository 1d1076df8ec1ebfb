//! Training engine facade.
//!
//! Ties the pure components (stress units, PMC, plan generation,
//! progression, suggestions) to a [`TrainingRepository`]. Every read is
//! recomputed from stored facts; nothing is cached between calls. Each
//! operation takes the athlete it acts on explicitly.

use chrono::{Duration, NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::metrics::analytics::{daily_stress, week_start, MAX_SERIES_DAYS};
use crate::metrics::{compute_stress_units, PerformanceManager, PmcPoint, PowerZones, StressUnits};
use crate::plans::{
    BuiltInPhases, Phase, PhaseCatalog, PlanError, PlanGenerator, TrainingPlan, WorkoutAssignment,
};
use crate::progression::{DifficultyRating, ProgressionState};
use crate::report::{coach_summary, CoachSnapshot};
use crate::rides::{RideEntry, RideRecord};
use crate::storage::config::DEFAULT_FTP_WATTS;
use crate::storage::{AthleteProfile, DatabaseError, TrainingRepository};
use crate::suggestions::{evaluate, Suggestion, SuggestionContext};
use crate::workouts::{BuiltInCatalog, CatalogWorkout, WorkoutCatalog};

/// Days of ride history listed in the coach summary.
pub const DEFAULT_HISTORY_DAYS: i64 = 28;
/// Days of PMC history used by the coach summary.
pub const DEFAULT_PMC_DAYS: usize = 90;

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Storage(#[from] DatabaseError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Ride not found: {0}")]
    RideNotFound(Uuid),

    #[error("No template for phase: {0}")]
    UnknownPhase(Phase),
}

/// Training load and periodization engine.
pub struct TrainingEngine<R: TrainingRepository> {
    repo: R,
    catalog: Box<dyn WorkoutCatalog>,
    phases: Box<dyn PhaseCatalog>,
    clock: Box<dyn Clock>,
    pmc: PerformanceManager,
    default_ftp_watts: u16,
    history_days: i64,
    pmc_days: usize,
}

impl<R: TrainingRepository> TrainingEngine<R> {
    /// Create an engine with the built-in catalogs and the system clock.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            catalog: Box::new(BuiltInCatalog::new()),
            phases: Box::new(BuiltInPhases::new()),
            clock: Box::new(SystemClock),
            pmc: PerformanceManager::new(),
            default_ftp_watts: DEFAULT_FTP_WATTS,
            history_days: DEFAULT_HISTORY_DAYS,
            pmc_days: DEFAULT_PMC_DAYS,
        }
    }

    /// Use a different clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Use a different workout catalog.
    pub fn with_catalog(mut self, catalog: impl WorkoutCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    /// Use different phase templates.
    pub fn with_phases(mut self, phases: impl PhaseCatalog + 'static) -> Self {
        self.phases = Box::new(phases);
        self
    }

    /// Threshold power used for athletes without a profile.
    pub fn with_default_ftp(mut self, ftp_watts: u16) -> Self {
        self.default_ftp_watts = ftp_watts;
        self
    }

    /// Windows used by the coach summary.
    pub fn with_summary_windows(mut self, pmc_days: usize, history_days: i64) -> Self {
        self.pmc_days = pmc_days;
        self.history_days = history_days;
        self
    }

    /// Current date according to the engine's clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Workout catalog in use.
    pub fn catalog(&self) -> &dyn WorkoutCatalog {
        self.catalog.as_ref()
    }

    /// Underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    // ========== Stress units ==========

    /// IF and TSS for a ride, `None` without usable average power.
    pub fn compute_stress_units(
        &self,
        duration_minutes: f64,
        avg_power: Option<f64>,
        ftp_watts: u16,
    ) -> Option<StressUnits> {
        compute_stress_units(duration_minutes, avg_power, ftp_watts as f64)
    }

    // ========== Profile ==========

    /// Save a profile, stamping today as the threshold test date.
    pub fn save_profile(&self, mut profile: AthleteProfile) -> Result<AthleteProfile, EngineError> {
        profile.ftp_tested_date = Some(self.today());
        profile.updated_at = Utc::now();
        self.repo.save_profile(&profile)?;

        tracing::info!(
            "Saved profile for athlete {} (FTP {}W)",
            profile.athlete_id,
            profile.ftp_watts
        );
        Ok(profile)
    }

    /// Load a profile.
    pub fn profile(&self, athlete_id: &Uuid) -> Result<Option<AthleteProfile>, EngineError> {
        Ok(self.repo.load_profile(athlete_id)?)
    }

    /// Threshold power for stress units: the profile's, or the default.
    pub fn threshold_power(&self, athlete_id: &Uuid) -> Result<u16, EngineError> {
        Ok(self
            .repo
            .load_profile(athlete_id)?
            .map(|p| p.ftp_watts)
            .unwrap_or(self.default_ftp_watts))
    }

    /// Power zones for the athlete's threshold power.
    pub fn power_zones(&self, athlete_id: &Uuid) -> Result<PowerZones, EngineError> {
        Ok(PowerZones::from_ftp(self.threshold_power(athlete_id)?))
    }

    // ========== Rides ==========

    /// Log a ride, deriving IF and TSS from the current threshold power.
    pub fn log_ride(&self, athlete_id: &Uuid, entry: RideEntry) -> Result<RideRecord, EngineError> {
        let ftp = self.threshold_power(athlete_id)?;
        let ride = RideRecord::from_entry(*athlete_id, entry, ftp);
        self.repo.save_ride(&ride)?;

        tracing::info!(
            "Logged ride {} on {} (TSS {:?})",
            ride.id,
            ride.ride_date,
            ride.tss
        );
        Ok(ride)
    }

    /// Replace a ride's facts and re-derive its stress units.
    pub fn amend_ride(&self, ride_id: &Uuid, entry: RideEntry) -> Result<RideRecord, EngineError> {
        let existing = self
            .repo
            .get_ride(ride_id)?
            .ok_or(EngineError::RideNotFound(*ride_id))?;

        let ftp = self.threshold_power(&existing.athlete_id)?;
        let ride = existing.amended(entry, ftp);
        self.repo.save_ride(&ride)?;

        tracing::info!("Amended ride {}", ride.id);
        Ok(ride)
    }

    /// Rides from the last `days` days, newest first. `days` is clamped
    /// into `0..=MAX_SERIES_DAYS`.
    pub fn ride_history(&self, athlete_id: &Uuid, days: i64) -> Result<Vec<RideRecord>, EngineError> {
        let days = days.clamp(0, MAX_SERIES_DAYS as i64);
        let since = self.today() - Duration::days(days);
        Ok(self.repo.list_rides(athlete_id, since)?)
    }

    // ========== Performance ==========

    /// Dense daily PMC series for the `days` days ending today, at most
    /// `MAX_SERIES_DAYS` points.
    pub fn performance_series(&self, athlete_id: &Uuid, days: usize) -> Result<Vec<PmcPoint>, EngineError> {
        if days == 0 {
            return Ok(Vec::new());
        }

        let today = self.today();
        let since = PerformanceManager::history_start(today, days);
        let rides = self.repo.list_rides(athlete_id, since)?;
        let daily = daily_stress(&rides);

        Ok(self.pmc.series(&daily, today, days))
    }

    /// Stress in the 7 days starting at `week_start`.
    pub fn weekly_stress(&self, athlete_id: &Uuid, week_start: NaiveDate) -> Result<f64, EngineError> {
        let week_end = week_start
            .checked_add_signed(Duration::days(7))
            .unwrap_or(NaiveDate::MAX);
        Ok(self.repo.sum_stress_in_window(athlete_id, week_start, week_end)?)
    }

    /// Stress in the Monday-anchored week containing today.
    pub fn current_week_stress(&self, athlete_id: &Uuid) -> Result<f64, EngineError> {
        self.weekly_stress(athlete_id, week_start(self.today()))
    }

    // ========== Plans ==========

    /// Generate a plan starting from the next week boundary. Not persisted.
    pub fn generate_plan(
        &self,
        athlete_id: &Uuid,
        phase: Phase,
        weeks: u32,
        days_per_week: u8,
    ) -> Result<TrainingPlan, EngineError> {
        let template = self
            .phases
            .template(phase)
            .ok_or(EngineError::UnknownPhase(phase))?;

        Ok(PlanGenerator::new(self.catalog.as_ref()).generate(
            *athlete_id,
            template,
            weeks,
            days_per_week,
            self.today(),
        ))
    }

    /// Persist a plan as the athlete's active plan, deactivating any other.
    pub fn save_plan(&self, plan: &TrainingPlan) -> Result<TrainingPlan, EngineError> {
        self.repo.save_active_plan(plan)?;
        Ok(TrainingPlan {
            active: true,
            ..plan.clone()
        })
    }

    /// The athlete's active plan.
    pub fn active_plan(&self, athlete_id: &Uuid) -> Result<Option<TrainingPlan>, EngineError> {
        Ok(self.repo.load_active_plan(athlete_id)?)
    }

    /// End the active plan without a replacement. Returns whether a plan
    /// was active.
    pub fn deactivate_plan(&self, athlete_id: &Uuid) -> Result<bool, EngineError> {
        let changed = self.repo.deactivate_plans(athlete_id)?;
        if changed > 0 {
            tracing::info!("Deactivated plan for athlete {}", athlete_id);
        }
        Ok(changed > 0)
    }

    /// All plans, newest first.
    pub fn plan_history(&self, athlete_id: &Uuid) -> Result<Vec<TrainingPlan>, EngineError> {
        Ok(self.repo.list_plans(athlete_id)?)
    }

    /// Assignments of the active plan's week containing today.
    pub fn this_week_assignments(&self, athlete_id: &Uuid) -> Result<Vec<WorkoutAssignment>, EngineError> {
        Ok(self
            .repo
            .load_active_plan(athlete_id)?
            .map(|plan| plan.week_assignments(self.today()))
            .unwrap_or_default())
    }

    /// Mark an assignment completed and apply the rating to progression.
    ///
    /// Returns the new plan revision, or `None` without an active plan.
    pub fn complete_assignment(
        &self,
        athlete_id: &Uuid,
        assignment_id: &str,
        rating: DifficultyRating,
    ) -> Result<Option<TrainingPlan>, EngineError> {
        let Some(plan) = self.repo.load_active_plan(athlete_id)? else {
            return Ok(None);
        };

        let next = plan.with_completed(assignment_id)?;

        let workout_type = next
            .assignment(assignment_id)
            .and_then(|a| self.catalog.lookup(&a.workout_id))
            .map(|w| w.workout_type);

        let mut progression = None;
        if let Some(workout_type) = workout_type {
            let mut state = self.progression(athlete_id)?;
            if let Some(level) = state.apply_rating(workout_type, rating) {
                tracing::debug!("{} level now {:.1}", workout_type, level);
                progression = Some(state);
            }
        }

        // Plan revision and levels commit together
        self.repo
            .record_completion(athlete_id, &next, progression.as_ref())?;

        tracing::info!(
            "Completed {} ({}) in plan {} rev {}",
            assignment_id,
            rating,
            next.id,
            next.revision
        );
        Ok(Some(next))
    }

    /// Move an assignment to a new date.
    ///
    /// Returns the new plan revision, or `None` without an active plan.
    pub fn reschedule_assignment(
        &self,
        athlete_id: &Uuid,
        assignment_id: &str,
        new_date: NaiveDate,
    ) -> Result<Option<TrainingPlan>, EngineError> {
        let Some(plan) = self.repo.load_active_plan(athlete_id)? else {
            return Ok(None);
        };

        let next = plan.with_rescheduled(assignment_id, new_date)?;
        self.repo.update_plan(&next)?;

        tracing::info!(
            "Rescheduled {} to {} in plan {} rev {}",
            assignment_id,
            new_date,
            next.id,
            next.revision
        );
        Ok(Some(next))
    }

    // ========== Progression ==========

    /// Progression levels, all at the minimum before the first rated session.
    pub fn progression(&self, athlete_id: &Uuid) -> Result<ProgressionState, EngineError> {
        Ok(self.repo.load_progression(athlete_id)?.unwrap_or_default())
    }

    /// Catalog workout for the system with the most room to grow.
    pub fn suggest_workout(&self, athlete_id: &Uuid) -> Result<Option<CatalogWorkout>, EngineError> {
        let progression = self.progression(athlete_id)?;
        Ok(progression.suggest_workout(self.catalog.as_ref()).cloned())
    }

    // ========== Suggestions ==========

    /// Advisory messages for the athlete's current state.
    pub fn suggestions(&self, athlete_id: &Uuid) -> Result<Vec<Suggestion>, EngineError> {
        let last_rated_ride = self.repo.last_rated_ride(athlete_id)?;
        let weekly_stress = self.current_week_stress(athlete_id)?;
        let active_plan = self.repo.load_active_plan(athlete_id)?;

        let ctx = SuggestionContext {
            last_rated_ride: last_rated_ride.as_ref(),
            weekly_stress,
            active_plan: active_plan.as_ref(),
            today: self.today(),
        };
        Ok(evaluate(&ctx, self.catalog.as_ref()))
    }

    // ========== Summary ==========

    /// Plain-text summary of profile, fitness, progression, rides and plan.
    pub fn coach_summary(&self, athlete_id: &Uuid) -> Result<String, EngineError> {
        let profile = self.repo.load_profile(athlete_id)?;
        let pmc = self.performance_series(athlete_id, self.pmc_days)?;
        let progression = self.progression(athlete_id)?;
        let recent_rides = self.ride_history(athlete_id, self.history_days)?;
        let active_plan = self.repo.load_active_plan(athlete_id)?;
        let phase_template = active_plan
            .as_ref()
            .and_then(|plan| self.phases.template(plan.phase));
        let week_stress = self.current_week_stress(athlete_id)?;

        let snapshot = CoachSnapshot {
            profile: profile.as_ref(),
            pmc: &pmc,
            progression: &progression,
            recent_rides: &recent_rides,
            history_days: self.history_days,
            active_plan: active_plan.as_ref(),
            phase_template,
            week_stress,
            today: self.today(),
        };
        Ok(coach_summary(&snapshot, self.catalog.as_ref()))
    }
}
