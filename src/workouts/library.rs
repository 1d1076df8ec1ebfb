//! Built-in workout catalog.
//!
//! The catalog is static reference data addressed by opaque string IDs.
//! Callers go through [`WorkoutCatalog`] so an alternative catalog can be
//! plugged in; lookups of unknown IDs degrade to `None`.

use super::types::{CatalogWorkout, WorkoutType};

/// Read-only access to structured workouts.
pub trait WorkoutCatalog {
    /// All workouts in catalog order.
    fn workouts(&self) -> &[CatalogWorkout];

    /// Look up a workout by ID.
    fn lookup(&self, id: &str) -> Option<&CatalogWorkout> {
        self.workouts().iter().find(|w| w.id == id)
    }

    /// Workouts of one type, in catalog order.
    fn by_type(&self, workout_type: WorkoutType) -> Vec<&CatalogWorkout> {
        self.workouts()
            .iter()
            .filter(|w| w.workout_type == workout_type)
            .collect()
    }

    /// TSS estimate for an ID, 0 when unresolved.
    fn tss_estimate(&self, id: &str) -> f64 {
        self.lookup(id).map(|w| w.tss_estimate).unwrap_or(0.0)
    }

    /// Display name for an ID, empty when unresolved.
    fn name_of(&self, id: &str) -> String {
        self.lookup(id).map(|w| w.name.clone()).unwrap_or_default()
    }
}

/// The catalog shipped with the engine.
pub struct BuiltInCatalog {
    workouts: Vec<CatalogWorkout>,
}

impl BuiltInCatalog {
    /// Create the built-in catalog.
    pub fn new() -> Self {
        Self {
            workouts: generate_workouts(),
        }
    }

    /// Create a catalog from arbitrary entries.
    pub fn from_workouts(workouts: Vec<CatalogWorkout>) -> Self {
        Self { workouts }
    }

    /// Number of workouts.
    pub fn count(&self) -> usize {
        self.workouts.len()
    }
}

impl Default for BuiltInCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutCatalog for BuiltInCatalog {
    fn workouts(&self) -> &[CatalogWorkout] {
        &self.workouts
    }
}

fn generate_workouts() -> Vec<CatalogWorkout> {
    use WorkoutType::*;

    vec![
        // Recovery
        CatalogWorkout::new("recovery_30", "Easy Spin", Recovery, 30, 22.0, 1.0),
        CatalogWorkout::new("recovery_45", "Pettit", Recovery, 45, 34.0, 1.5),
        // Endurance
        CatalogWorkout::new("endurance_60", "Carson -4", Endurance, 60, 46.0, 2.0),
        CatalogWorkout::new("endurance_90", "Koip -2", Endurance, 90, 68.0, 3.0),
        CatalogWorkout::new("endurance_120", "Fletcher", Endurance, 120, 91.0, 4.0),
        // Tempo
        CatalogWorkout::new("tempo_60_3x10", "Geiger", Tempo, 60, 55.0, 3.5),
        CatalogWorkout::new("tempo_75_2x20", "Mount Field", Tempo, 75, 72.0, 5.0),
        // Sweet spot
        CatalogWorkout::new("ss_60_2x15", "Antelope", SweetSpot, 60, 64.0, 4.5),
        CatalogWorkout::new("ss_75_3x12", "Eclipse", SweetSpot, 75, 80.0, 5.5),
        CatalogWorkout::new("ss_90_3x15", "Carillon", SweetSpot, 90, 100.0, 6.5),
        // Threshold
        CatalogWorkout::new("threshold_60_2x10", "Kaiser", Threshold, 60, 68.0, 5.0),
        CatalogWorkout::new("threshold_75_20min", "Lamarck", Threshold, 75, 82.0, 6.5),
        CatalogWorkout::new("threshold_90_3x12", "Mount Baldy", Threshold, 90, 105.0, 7.5),
        // VO2max
        CatalogWorkout::new("vo2_45_5x3", "Baird +2", Vo2max, 45, 60.0, 6.0),
        CatalogWorkout::new("vo2_60_4x5", "Ericsson", Vo2max, 60, 78.0, 7.0),
        CatalogWorkout::new("vo2_60_6x3", "Dade +1", Vo2max, 60, 80.0, 7.5),
        // Anaerobic
        CatalogWorkout::new("anaerobic_45_8x1", "Bluebell", Anaerobic, 45, 68.0, 7.0),
        CatalogWorkout::new("anaerobic_50_10x30", "Spanish Needle", Anaerobic, 50, 72.0, 8.5),
        CatalogWorkout::new("anaerobic_45_crit", "Criterium Simulation", Anaerobic, 45, 65.0, 7.5),
    ]
}
