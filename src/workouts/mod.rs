//! Workout catalog.
//!
//! Static structured-workout definitions referenced by training plans,
//! rides and the progression tracker.

pub mod library;
pub mod types;

pub use library::{BuiltInCatalog, WorkoutCatalog};
pub use types::{CatalogWorkout, WorkoutType};
