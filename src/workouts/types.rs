//! Workout catalog types.

use serde::{Deserialize, Serialize};

use crate::metrics::zones::PowerZone;

/// Energy system / workout type a catalog workout targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Recovery,
    Endurance,
    Tempo,
    SweetSpot,
    Threshold,
    Vo2max,
    Anaerobic,
}

impl WorkoutType {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkoutType::Recovery => "Recovery",
            WorkoutType::Endurance => "Endurance",
            WorkoutType::Tempo => "Tempo",
            WorkoutType::SweetSpot => "Sweet Spot",
            WorkoutType::Threshold => "Threshold",
            WorkoutType::Vo2max => "VO2max",
            WorkoutType::Anaerobic => "Anaerobic",
        }
    }

    /// Storage key, also used as the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            WorkoutType::Recovery => "recovery",
            WorkoutType::Endurance => "endurance",
            WorkoutType::Tempo => "tempo",
            WorkoutType::SweetSpot => "sweet_spot",
            WorkoutType::Threshold => "threshold",
            WorkoutType::Vo2max => "vo2max",
            WorkoutType::Anaerobic => "anaerobic",
        }
    }

    /// Zone the main sets of this type are ridden in.
    pub fn primary_zone(&self) -> PowerZone {
        match self {
            WorkoutType::Recovery => PowerZone::Z1,
            WorkoutType::Endurance => PowerZone::Z2,
            WorkoutType::Tempo => PowerZone::Z3,
            WorkoutType::SweetSpot | WorkoutType::Threshold => PowerZone::Z4,
            WorkoutType::Vo2max => PowerZone::Z5,
            WorkoutType::Anaerobic => PowerZone::Z6,
        }
    }

    /// Get all workout types.
    pub fn all() -> Vec<WorkoutType> {
        vec![
            WorkoutType::Recovery,
            WorkoutType::Endurance,
            WorkoutType::Tempo,
            WorkoutType::SweetSpot,
            WorkoutType::Threshold,
            WorkoutType::Vo2max,
            WorkoutType::Anaerobic,
        ]
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkoutType::all()
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("Unknown workout type: {}", s))
    }
}

/// A structured workout as described by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogWorkout {
    /// Opaque catalog identifier (e.g. "ss_60_2x15")
    pub id: String,
    /// Display name
    pub name: String,
    /// Targeted energy system
    pub workout_type: WorkoutType,
    /// Duration in minutes
    pub duration_minutes: u16,
    /// Estimated TSS at the athlete's FTP
    pub tss_estimate: f64,
    /// Difficulty on the 1-10 progression scale
    pub difficulty_level: f64,
}

impl CatalogWorkout {
    /// Create a catalog entry.
    pub fn new(
        id: &str,
        name: &str,
        workout_type: WorkoutType,
        duration_minutes: u16,
        tss_estimate: f64,
        difficulty_level: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            workout_type,
            duration_minutes,
            tss_estimate,
            difficulty_level,
        }
    }
}
