//! SQLite-backed training repository.
//!
//! Stores athlete profiles, ride logs, progression levels and training
//! plans. Plans are kept as a JSON document next to the columns used for
//! lookup (`active`, `revision`).

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::plans::TrainingPlan;
use crate::progression::{DifficultyRating, ProgressionState};
use crate::rides::{RideRecord, RideSource};
use crate::storage::config::{AthleteProfile, AthleteType};
use crate::storage::database::DatabaseError;
use crate::storage::repository::TrainingRepository;
use crate::workouts::WorkoutType;

const RIDE_COLUMNS: &str = "id, athlete_id, ride_date, duration_minutes, avg_power, normalized_power,
     intensity_factor, tss, elevation_m, difficulty, workout_id, notes, source, created_at";

/// Training store over a borrowed connection.
pub struct TrainingStore<'a> {
    conn: &'a Connection,
}

impl<'a> TrainingStore<'a> {
    /// Create a new training store with the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn query_rides(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<RideRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params, RideRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut rides = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            rides.push(row.into_ride()?);
        }
        Ok(rides)
    }

    fn query_plans(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<TrainingPlan>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params, |row| {
                Ok(PlanRow {
                    plan_json: row.get(0)?,
                    active: row.get(1)?,
                    revision: row.get(2)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut plans = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            plans.push(row.into_plan()?);
        }
        Ok(plans)
    }

    fn insert_plan(conn: &Connection, plan: &TrainingPlan, active: bool) -> Result<(), DatabaseError> {
        let stored = TrainingPlan {
            active,
            ..plan.clone()
        };
        let plan_json = serde_json::to_string(&stored)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        conn.execute(
            "INSERT INTO training_plans (id, athlete_id, phase, start_date, weeks, days_per_week,
             plan_json, active, revision, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                plan.id.to_string(),
                plan.athlete_id.to_string(),
                plan.phase.key(),
                plan.start_date.to_string(),
                plan.weeks,
                plan.days_per_week,
                plan_json,
                active,
                plan.revision,
                plan.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Store a new revision of an existing plan. The `active` column is
    /// left alone; only activation and deactivation change it.
    fn write_revision(conn: &Connection, plan: &TrainingPlan) -> Result<(), DatabaseError> {
        let plan_json = serde_json::to_string(plan)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        let updated = conn
            .execute(
                "UPDATE training_plans SET plan_json = ?2, revision = ?3 WHERE id = ?1",
                params![plan.id.to_string(), plan_json, plan.revision],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if updated == 0 {
            return Err(DatabaseError::NotFound(format!("Training plan {}", plan.id)));
        }
        Ok(())
    }

    fn write_progression(
        conn: &Connection,
        athlete_id: &Uuid,
        state: &ProgressionState,
    ) -> Result<(), DatabaseError> {
        let level = |t: WorkoutType| state.level(t).unwrap_or(crate::progression::MIN_LEVEL);

        conn.execute(
            r#"
            INSERT INTO progression_levels (athlete_id, endurance, tempo, sweet_spot,
                threshold, vo2max, anaerobic, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(athlete_id) DO UPDATE SET
                endurance = excluded.endurance,
                tempo = excluded.tempo,
                sweet_spot = excluded.sweet_spot,
                threshold = excluded.threshold,
                vo2max = excluded.vo2max,
                anaerobic = excluded.anaerobic,
                updated_at = excluded.updated_at
            "#,
            params![
                athlete_id.to_string(),
                level(WorkoutType::Endurance),
                level(WorkoutType::Tempo),
                level(WorkoutType::SweetSpot),
                level(WorkoutType::Threshold),
                level(WorkoutType::Vo2max),
                level(WorkoutType::Anaerobic),
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

impl TrainingRepository for TrainingStore<'_> {
    fn save_profile(&self, profile: &AthleteProfile) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                r#"
                INSERT INTO athlete_profiles (athlete_id, ftp_watts, weight_kg, athlete_type,
                    goal_event, goal_date, ftp_tested_date, created_at, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ON CONFLICT(athlete_id) DO UPDATE SET
                    ftp_watts = excluded.ftp_watts,
                    weight_kg = excluded.weight_kg,
                    athlete_type = excluded.athlete_type,
                    goal_event = excluded.goal_event,
                    goal_date = excluded.goal_date,
                    ftp_tested_date = excluded.ftp_tested_date,
                    updated_at = excluded.updated_at
                "#,
                params![
                    profile.athlete_id.to_string(),
                    profile.ftp_watts,
                    profile.weight_kg,
                    profile.athlete_type.key(),
                    profile.goal_event,
                    profile.goal_date.map(|d| d.to_string()),
                    profile.ftp_tested_date.map(|d| d.to_string()),
                    profile.created_at.to_rfc3339(),
                    profile.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tracing::debug!("Saved profile for athlete {}", profile.athlete_id);
        Ok(())
    }

    fn load_profile(&self, athlete_id: &Uuid) -> Result<Option<AthleteProfile>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT athlete_id, ftp_watts, weight_kg, athlete_type, goal_event, goal_date,
                 ftp_tested_date, created_at, updated_at
                 FROM athlete_profiles WHERE athlete_id = ?1",
                params![athlete_id.to_string()],
                |row| {
                    Ok(ProfileRow {
                        athlete_id: row.get(0)?,
                        ftp_watts: row.get(1)?,
                        weight_kg: row.get(2)?,
                        athlete_type: row.get(3)?,
                        goal_event: row.get(4)?,
                        goal_date: row.get(5)?,
                        ftp_tested_date: row.get(6)?,
                        created_at: row.get(7)?,
                        updated_at: row.get(8)?,
                    })
                },
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(ProfileRow::into_profile).transpose()
    }

    fn save_ride(&self, ride: &RideRecord) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO ride_logs (id, athlete_id, ride_date, duration_minutes,
                 avg_power, normalized_power, intensity_factor, tss, elevation_m, difficulty,
                 workout_id, notes, source, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    ride.id.to_string(),
                    ride.athlete_id.to_string(),
                    ride.ride_date.to_string(),
                    ride.duration_minutes,
                    ride.avg_power,
                    ride.normalized_power,
                    ride.intensity_factor,
                    ride.tss,
                    ride.elevation_m,
                    ride.difficulty.map(u8::from),
                    ride.workout_id,
                    ride.notes,
                    ride.source.key(),
                    ride.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    fn get_ride(&self, ride_id: &Uuid) -> Result<Option<RideRecord>, DatabaseError> {
        let sql = format!("SELECT {} FROM ride_logs WHERE id = ?1", RIDE_COLUMNS);
        let rides = self.query_rides(&sql, &[&ride_id.to_string()])?;
        Ok(rides.into_iter().next())
    }

    fn list_rides(&self, athlete_id: &Uuid, since: NaiveDate) -> Result<Vec<RideRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM ride_logs WHERE athlete_id = ?1 AND ride_date >= ?2
             ORDER BY ride_date DESC, created_at DESC",
            RIDE_COLUMNS
        );
        self.query_rides(&sql, &[&athlete_id.to_string(), &since.to_string()])
    }

    fn last_rated_ride(&self, athlete_id: &Uuid) -> Result<Option<RideRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM ride_logs WHERE athlete_id = ?1 AND difficulty IS NOT NULL
             ORDER BY ride_date DESC, created_at DESC LIMIT 1",
            RIDE_COLUMNS
        );
        let rides = self.query_rides(&sql, &[&athlete_id.to_string()])?;
        Ok(rides.into_iter().next())
    }

    fn sum_stress_in_window(
        &self,
        athlete_id: &Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64, DatabaseError> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(tss), 0.0) FROM ride_logs
                 WHERE athlete_id = ?1 AND ride_date >= ?2 AND ride_date < ?3",
                params![athlete_id.to_string(), start.to_string(), end.to_string()],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    fn save_progression(&self, athlete_id: &Uuid, state: &ProgressionState) -> Result<(), DatabaseError> {
        Self::write_progression(self.conn, athlete_id, state)
    }

    fn load_progression(&self, athlete_id: &Uuid) -> Result<Option<ProgressionState>, DatabaseError> {
        self.conn
            .query_row(
                "SELECT endurance, tempo, sweet_spot, threshold, vo2max, anaerobic
                 FROM progression_levels WHERE athlete_id = ?1",
                params![athlete_id.to_string()],
                |row| {
                    Ok(ProgressionState::from_levels([
                        (WorkoutType::Endurance, row.get::<_, f64>(0)?),
                        (WorkoutType::Tempo, row.get::<_, f64>(1)?),
                        (WorkoutType::SweetSpot, row.get::<_, f64>(2)?),
                        (WorkoutType::Threshold, row.get::<_, f64>(3)?),
                        (WorkoutType::Vo2max, row.get::<_, f64>(4)?),
                        (WorkoutType::Anaerobic, row.get::<_, f64>(5)?),
                    ]))
                },
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    fn save_active_plan(&self, plan: &TrainingPlan) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let deactivated = tx
            .execute(
                "UPDATE training_plans SET active = 0 WHERE athlete_id = ?1 AND active = 1",
                params![plan.athlete_id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Self::insert_plan(&tx, plan, true)?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(
            "Activated plan {} for athlete {} ({} previous deactivated)",
            plan.id,
            plan.athlete_id,
            deactivated
        );
        Ok(())
    }

    fn update_plan(&self, plan: &TrainingPlan) -> Result<(), DatabaseError> {
        Self::write_revision(self.conn, plan)
    }

    fn record_completion(
        &self,
        athlete_id: &Uuid,
        plan: &TrainingPlan,
        progression: Option<&ProgressionState>,
    ) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        Self::write_revision(&tx, plan)?;
        if let Some(state) = progression {
            Self::write_progression(&tx, athlete_id, state)?;
        }

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    fn load_active_plan(&self, athlete_id: &Uuid) -> Result<Option<TrainingPlan>, DatabaseError> {
        let plans = self.query_plans(
            "SELECT plan_json, active, revision FROM training_plans
             WHERE athlete_id = ?1 AND active = 1
             ORDER BY created_at DESC LIMIT 1",
            &[&athlete_id.to_string()],
        )?;
        Ok(plans.into_iter().next())
    }

    fn deactivate_plans(&self, athlete_id: &Uuid) -> Result<usize, DatabaseError> {
        self.conn
            .execute(
                "UPDATE training_plans SET active = 0 WHERE athlete_id = ?1 AND active = 1",
                params![athlete_id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    fn list_plans(&self, athlete_id: &Uuid) -> Result<Vec<TrainingPlan>, DatabaseError> {
        self.query_plans(
            "SELECT plan_json, active, revision FROM training_plans
             WHERE athlete_id = ?1 ORDER BY created_at DESC",
            &[&athlete_id.to_string()],
        )
    }
}

/// Intermediate struct for reading ride rows from database.
struct RideRow {
    id: String,
    athlete_id: String,
    ride_date: String,
    duration_minutes: f64,
    avg_power: Option<f64>,
    normalized_power: Option<f64>,
    intensity_factor: Option<f64>,
    tss: Option<f64>,
    elevation_m: Option<f64>,
    difficulty: Option<u8>,
    workout_id: Option<String>,
    notes: Option<String>,
    source: String,
    created_at: String,
}

impl RideRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            athlete_id: row.get(1)?,
            ride_date: row.get(2)?,
            duration_minutes: row.get(3)?,
            avg_power: row.get(4)?,
            normalized_power: row.get(5)?,
            intensity_factor: row.get(6)?,
            tss: row.get(7)?,
            elevation_m: row.get(8)?,
            difficulty: row.get(9)?,
            workout_id: row.get(10)?,
            notes: row.get(11)?,
            source: row.get(12)?,
            created_at: row.get(13)?,
        })
    }

    fn into_ride(self) -> Result<RideRecord, DatabaseError> {
        let difficulty = self
            .difficulty
            .map(DifficultyRating::try_from)
            .transpose()
            .map_err(DatabaseError::DeserializationError)?;

        let source = self
            .source
            .parse::<RideSource>()
            .map_err(DatabaseError::DeserializationError)?;

        Ok(RideRecord {
            id: parse_uuid(&self.id)?,
            athlete_id: parse_uuid(&self.athlete_id)?,
            ride_date: parse_date(&self.ride_date)?,
            duration_minutes: self.duration_minutes,
            avg_power: self.avg_power,
            normalized_power: self.normalized_power,
            intensity_factor: self.intensity_factor,
            tss: self.tss,
            elevation_m: self.elevation_m,
            difficulty,
            workout_id: self.workout_id,
            notes: self.notes,
            source,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Intermediate struct for reading athlete profile rows from database.
struct ProfileRow {
    athlete_id: String,
    ftp_watts: u16,
    weight_kg: Option<f32>,
    athlete_type: String,
    goal_event: Option<String>,
    goal_date: Option<String>,
    ftp_tested_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn into_profile(self) -> Result<AthleteProfile, DatabaseError> {
        let athlete_type = self
            .athlete_type
            .parse::<AthleteType>()
            .map_err(DatabaseError::DeserializationError)?;

        Ok(AthleteProfile {
            athlete_id: parse_uuid(&self.athlete_id)?,
            ftp_watts: self.ftp_watts,
            weight_kg: self.weight_kg,
            athlete_type,
            goal_event: self.goal_event,
            goal_date: self.goal_date.as_deref().map(parse_date).transpose()?,
            ftp_tested_date: self.ftp_tested_date.as_deref().map(parse_date).transpose()?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Intermediate struct for reading plan rows from database.
struct PlanRow {
    plan_json: String,
    active: bool,
    revision: u32,
}

impl PlanRow {
    fn into_plan(self) -> Result<TrainingPlan, DatabaseError> {
        let mut plan: TrainingPlan = serde_json::from_str(&self.plan_json).map_err(|e| {
            DatabaseError::DeserializationError(format!("Invalid plan JSON: {}", e))
        })?;
        // Columns win over the document
        plan.active = self.active;
        plan.revision = self.revision;
        Ok(plan)
    }
}

fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value)
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid UUID: {}", e)))
}

fn parse_date(value: &str) -> Result<NaiveDate, DatabaseError> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid date: {}", e)))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid date: {}", e)))
}
