//! Ride record types.
//!
//! A ride is a logged fact. IF and TSS are derived from the average power
//! and the athlete's FTP whenever the ride is written, never edited
//! independently.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::calculator::compute_stress_units;
use crate::progression::DifficultyRating;

/// Where a ride record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideSource {
    /// Entered by hand
    #[default]
    Manual,
    /// Imported from a fitness platform
    Imported,
}

impl RideSource {
    /// Storage key.
    pub fn key(&self) -> &'static str {
        match self {
            RideSource::Manual => "manual",
            RideSource::Imported => "imported",
        }
    }
}

impl std::str::FromStr for RideSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(RideSource::Manual),
            "imported" => Ok(RideSource::Imported),
            _ => Err(format!("Unknown ride source: {}", s)),
        }
    }
}

/// Ride facts as entered, before stress units are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideEntry {
    /// Date of the ride
    pub ride_date: NaiveDate,
    /// Duration in minutes
    pub duration_minutes: f64,
    /// Average power in watts
    pub avg_power: Option<f64>,
    /// Normalized power in watts
    pub normalized_power: Option<f64>,
    /// Elevation gain in meters
    pub elevation_m: Option<f64>,
    /// Post-ride difficulty rating
    pub difficulty: Option<DifficultyRating>,
    /// Structured workout this ride followed
    pub workout_id: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Provenance
    pub source: RideSource,
}

impl RideEntry {
    /// Create an entry with only date and duration set.
    pub fn new(ride_date: NaiveDate, duration_minutes: f64) -> Self {
        Self {
            ride_date,
            duration_minutes,
            avg_power: None,
            normalized_power: None,
            elevation_m: None,
            difficulty: None,
            workout_id: None,
            notes: None,
            source: RideSource::Manual,
        }
    }

    /// Set average power.
    pub fn with_avg_power(mut self, watts: f64) -> Self {
        self.avg_power = Some(watts);
        self
    }

    /// Set difficulty rating.
    pub fn with_difficulty(mut self, rating: DifficultyRating) -> Self {
        self.difficulty = Some(rating);
        self
    }

    /// Set followed workout.
    pub fn with_workout(mut self, workout_id: &str) -> Self {
        self.workout_id = Some(workout_id.to_string());
        self
    }

    /// Set provenance.
    pub fn with_source(mut self, source: RideSource) -> Self {
        self.source = source;
        self
    }
}

/// A logged ride with derived stress units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Owning athlete
    pub athlete_id: Uuid,
    /// Date of the ride
    pub ride_date: NaiveDate,
    /// Duration in minutes
    pub duration_minutes: f64,
    /// Average power in watts
    pub avg_power: Option<f64>,
    /// Normalized power in watts
    pub normalized_power: Option<f64>,
    /// Intensity Factor, derived
    pub intensity_factor: Option<f64>,
    /// Training Stress Score, derived
    pub tss: Option<f64>,
    /// Elevation gain in meters
    pub elevation_m: Option<f64>,
    /// Post-ride difficulty rating
    pub difficulty: Option<DifficultyRating>,
    /// Structured workout this ride followed
    pub workout_id: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Provenance
    pub source: RideSource,
    /// When the ride was first logged
    pub created_at: DateTime<Utc>,
}

impl RideRecord {
    /// Build a new record, deriving IF and TSS from `ftp_watts`.
    pub fn from_entry(athlete_id: Uuid, entry: RideEntry, ftp_watts: u16) -> Self {
        let mut record = Self {
            id: Uuid::new_v4(),
            athlete_id,
            ride_date: entry.ride_date,
            duration_minutes: 0.0,
            avg_power: None,
            normalized_power: None,
            intensity_factor: None,
            tss: None,
            elevation_m: None,
            difficulty: None,
            workout_id: None,
            notes: None,
            source: entry.source,
            created_at: Utc::now(),
        };
        record.apply(entry, ftp_watts);
        record
    }

    /// Amended copy: same identity and creation time, new facts, stress
    /// units re-derived.
    pub fn amended(&self, entry: RideEntry, ftp_watts: u16) -> Self {
        let mut record = self.clone();
        record.apply(entry, ftp_watts);
        record
    }

    fn apply(&mut self, entry: RideEntry, ftp_watts: u16) {
        let avg_power = entry.avg_power.filter(|p| *p > 0.0);
        let units = compute_stress_units(entry.duration_minutes, avg_power, ftp_watts as f64);

        self.ride_date = entry.ride_date;
        self.duration_minutes = entry.duration_minutes;
        self.avg_power = avg_power;
        self.normalized_power = entry.normalized_power.filter(|p| *p > 0.0);
        self.intensity_factor = units.map(|u| u.intensity_factor);
        self.tss = units.map(|u| u.tss);
        self.elevation_m = entry.elevation_m;
        self.difficulty = entry.difficulty;
        self.workout_id = entry.workout_id.filter(|id| !id.is_empty());
        self.notes = entry.notes.filter(|n| !n.is_empty());
        self.source = entry.source;
    }
}
