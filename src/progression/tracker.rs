//! Per-athlete progression levels by energy system.
//!
//! Each tracked energy system holds a level on a 1.0-10.0 scale. A rated
//! session raises the level of its workout type by a base step plus a
//! rating-dependent delta; the result is clamped, never rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workouts::{CatalogWorkout, WorkoutCatalog, WorkoutType};

/// Lowest progression level.
pub const MIN_LEVEL: f64 = 1.0;
/// Highest progression level.
pub const MAX_LEVEL: f64 = 10.0;
/// Step applied for every rated session before the rating delta.
pub const BASE_STEP: f64 = 1.0;

/// Energy systems with a progression level, in tie-break order.
pub const TRACKED_SYSTEMS: [WorkoutType; 6] = [
    WorkoutType::Endurance,
    WorkoutType::Tempo,
    WorkoutType::SweetSpot,
    WorkoutType::Threshold,
    WorkoutType::Vo2max,
    WorkoutType::Anaerobic,
];

/// Post-session difficulty rating (1 = very easy, 5 = all out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DifficultyRating {
    VeryEasy,
    Easy,
    Moderate,
    Hard,
    AllOut,
}

impl DifficultyRating {
    /// Ordinal value (1-5).
    pub fn value(&self) -> u8 {
        match self {
            DifficultyRating::VeryEasy => 1,
            DifficultyRating::Easy => 2,
            DifficultyRating::Moderate => 3,
            DifficultyRating::Hard => 4,
            DifficultyRating::AllOut => 5,
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyRating::VeryEasy => "Very Easy",
            DifficultyRating::Easy => "Easy",
            DifficultyRating::Moderate => "Moderate",
            DifficultyRating::Hard => "Hard",
            DifficultyRating::AllOut => "All Out",
        }
    }

    /// Level delta added on top of the base step.
    pub fn progression_delta(&self) -> f64 {
        match self {
            DifficultyRating::VeryEasy => 0.5,
            DifficultyRating::Easy => 0.3,
            DifficultyRating::Moderate => 0.2,
            DifficultyRating::Hard => 0.1,
            DifficultyRating::AllOut => 0.0,
        }
    }

    /// Rating 1 or 2.
    pub fn is_easy(&self) -> bool {
        self.value() <= 2
    }
}

impl TryFrom<u8> for DifficultyRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DifficultyRating::VeryEasy),
            2 => Ok(DifficultyRating::Easy),
            3 => Ok(DifficultyRating::Moderate),
            4 => Ok(DifficultyRating::Hard),
            5 => Ok(DifficultyRating::AllOut),
            _ => Err(format!("Difficulty rating must be 1-5, got {}", value)),
        }
    }
}

impl From<DifficultyRating> for u8 {
    fn from(rating: DifficultyRating) -> Self {
        rating.value()
    }
}

impl std::fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Apply one rated session to a level.
pub fn step_level(level: f64, delta: f64) -> f64 {
    (level + BASE_STEP + delta).clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Progression levels for one athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    levels: BTreeMap<WorkoutType, f64>,
}

impl ProgressionState {
    /// Every tracked system at the minimum level.
    pub fn new() -> Self {
        Self {
            levels: TRACKED_SYSTEMS.iter().map(|t| (*t, MIN_LEVEL)).collect(),
        }
    }

    /// Build from stored levels. Untracked types are dropped and missing
    /// ones start at the minimum; values are clamped into range.
    pub fn from_levels(levels: impl IntoIterator<Item = (WorkoutType, f64)>) -> Self {
        let mut state = Self::new();
        for (workout_type, level) in levels {
            if state.levels.contains_key(&workout_type) {
                state
                    .levels
                    .insert(workout_type, level.clamp(MIN_LEVEL, MAX_LEVEL));
            }
        }
        state
    }

    /// Level of a system, `None` for untracked types.
    pub fn level(&self, workout_type: WorkoutType) -> Option<f64> {
        self.levels.get(&workout_type).copied()
    }

    /// Levels in tie-break order.
    pub fn levels(&self) -> Vec<(WorkoutType, f64)> {
        TRACKED_SYSTEMS
            .iter()
            .filter_map(|t| self.level(*t).map(|level| (*t, level)))
            .collect()
    }

    /// Apply a rated session. Returns the new level, or `None` when the
    /// workout type is not a tracked energy system.
    pub fn apply_rating(&mut self, workout_type: WorkoutType, rating: DifficultyRating) -> Option<f64> {
        let level = self.levels.get_mut(&workout_type)?;
        *level = step_level(*level, rating.progression_delta());
        Some(*level)
    }

    /// Systems sorted ascending by level; ties keep tie-break order.
    pub fn by_room_to_grow(&self) -> Vec<(WorkoutType, f64)> {
        let mut levels = self.levels();
        levels.sort_by(|a, b| a.1.total_cmp(&b.1));
        levels
    }

    /// Pick a workout for the system with the most room to grow.
    ///
    /// Prefers a workout whose difficulty lies within
    /// `[level - 0.5, level + 1.5]`, then the first workout of that type.
    /// Systems with no catalog entries are skipped.
    pub fn suggest_workout<'c, C>(&self, catalog: &'c C) -> Option<&'c CatalogWorkout>
    where
        C: WorkoutCatalog + ?Sized,
    {
        for (workout_type, level) in self.by_room_to_grow() {
            let candidates = catalog.by_type(workout_type);
            if candidates.is_empty() {
                continue;
            }

            let in_window = candidates.iter().find(|w| {
                w.difficulty_level >= level - 0.5 && w.difficulty_level <= level + 1.5
            });

            return in_window.or(candidates.first()).copied();
        }
        None
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}
