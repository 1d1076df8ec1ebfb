//! Database schema definitions.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Athlete profiles table
CREATE TABLE IF NOT EXISTS athlete_profiles (
    athlete_id TEXT PRIMARY KEY,
    ftp_watts INTEGER NOT NULL DEFAULT 200,
    weight_kg REAL,
    athlete_type TEXT NOT NULL DEFAULT 'all_around',
    goal_event TEXT,
    goal_date TEXT,
    ftp_tested_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Ride logs table
CREATE TABLE IF NOT EXISTS ride_logs (
    id TEXT PRIMARY KEY,
    athlete_id TEXT NOT NULL,
    ride_date TEXT NOT NULL,
    duration_minutes REAL NOT NULL,
    avg_power REAL,
    normalized_power REAL,
    intensity_factor REAL,
    tss REAL,
    elevation_m REAL,
    difficulty INTEGER CHECK (difficulty BETWEEN 1 AND 5),
    workout_id TEXT,
    notes TEXT,
    source TEXT NOT NULL DEFAULT 'manual',
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_ride_logs_athlete_date ON ride_logs(athlete_id, ride_date);

-- Progression levels table
CREATE TABLE IF NOT EXISTS progression_levels (
    athlete_id TEXT PRIMARY KEY,
    endurance REAL NOT NULL DEFAULT 1.0,
    tempo REAL NOT NULL DEFAULT 1.0,
    sweet_spot REAL NOT NULL DEFAULT 1.0,
    threshold REAL NOT NULL DEFAULT 1.0,
    vo2max REAL NOT NULL DEFAULT 1.0,
    anaerobic REAL NOT NULL DEFAULT 1.0,
    updated_at TEXT NOT NULL
);

-- Training plans table
CREATE TABLE IF NOT EXISTS training_plans (
    id TEXT PRIMARY KEY,
    athlete_id TEXT NOT NULL,
    phase TEXT NOT NULL,
    start_date TEXT NOT NULL,
    weeks INTEGER NOT NULL,
    days_per_week INTEGER NOT NULL,
    plan_json TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 0,
    revision INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_training_plans_active ON training_plans(athlete_id, active);
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Schema version written by this build. Databases stamped with a higher
/// version are refused.
pub const CURRENT_VERSION: i32 = 1;
