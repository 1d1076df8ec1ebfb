//! Training analytics.
//!
//! - Training Load (CTL/ATL/TSB) via the Performance Management Chart model
//! - Daily and weekly stress aggregation

pub mod training_load;

pub use training_load::{
    daily_stress, week_start, weekly_stress_sum, FormStatus, PerformanceManager, PmcPoint,
    MAX_SERIES_DAYS, PRIMING_DAYS,
};
