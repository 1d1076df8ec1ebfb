//! RideLoad - Training Load & Periodization Engine
//!
//! Turns ride power data into training-stress units, tracks fitness,
//! fatigue and form with an impulse-response model, generates periodized
//! multi-week plans, and adapts progression levels and workout suggestions
//! from post-ride feedback.

pub mod clock;
pub mod engine;
pub mod metrics;
pub mod plans;
pub mod progression;
pub mod report;
pub mod rides;
pub mod storage;
pub mod suggestions;
pub mod workouts;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{EngineError, TrainingEngine};
pub use metrics::PerformanceManager;
pub use plans::{Phase, PlanGenerator, TrainingPlan};
pub use progression::{DifficultyRating, ProgressionState};
pub use rides::{RideEntry, RideRecord};
pub use storage::{AthleteProfile, Database, TrainingStore};
