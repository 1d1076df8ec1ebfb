//! Metrics module for stress units, power zones and training load.

pub mod analytics;
pub mod calculator;
pub mod zones;

pub use analytics::{FormStatus, PerformanceManager, PmcPoint};
pub use calculator::{compute_stress_units, intensity_factor, training_stress_score, RacerCategory, StressUnits};
pub use zones::{PowerZone, PowerZones, ZoneRange};
