//! Progression tracking.
//!
//! Bounded per-energy-system skill levels, updated from post-session
//! difficulty ratings and used to pick the next workout.

pub mod tracker;

pub use tracker::{
    step_level, DifficultyRating, ProgressionState, MAX_LEVEL, MIN_LEVEL, TRACKED_SYSTEMS,
};
