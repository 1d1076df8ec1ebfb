//! Stress-unit calculations for completed rides.
//!
//! Converts a ride's duration and average power into an Intensity Factor
//! and a Training Stress Score relative to the athlete's FTP. All functions
//! are pure; non-positive inputs yield a neutral zero instead of an error.

use serde::{Deserialize, Serialize};

/// Derived stress units for a single ride.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressUnits {
    /// Average power divided by FTP, rounded to 3 decimals
    pub intensity_factor: f64,
    /// Training Stress Score, rounded to 1 decimal
    pub tss: f64,
}

/// Intensity Factor = average power / FTP.
///
/// Returns 0 when the threshold power is not positive.
pub fn intensity_factor(avg_power: f64, ftp_watts: f64) -> f64 {
    if ftp_watts <= 0.0 {
        return 0.0;
    }
    round_to(avg_power / ftp_watts, 3)
}

/// Training Stress Score for a ride at constant average power.
///
/// `TSS = duration_hours × avg_power × IF / FTP × 100`, so one hour at
/// exactly FTP scores 100. Returns 0 when the duration or either power is
/// not positive.
pub fn training_stress_score(duration_minutes: f64, avg_power: f64, ftp_watts: f64) -> f64 {
    if duration_minutes.is_nan()
        || duration_minutes <= 0.0
        || ftp_watts <= 0.0
        || avg_power <= 0.0
    {
        return 0.0;
    }
    let if_value = avg_power / ftp_watts;
    let tss = (duration_minutes / 60.0) * avg_power * if_value / ftp_watts * 100.0;
    round_to(tss, 1)
}

/// Compute both stress units for a ride.
///
/// Returns `None` when the ride has no usable average power, which is how
/// a ride logged without a power meter is stored. A non-positive duration
/// keeps the IF but scores zero TSS.
pub fn compute_stress_units(
    duration_minutes: f64,
    avg_power: Option<f64>,
    ftp_watts: f64,
) -> Option<StressUnits> {
    let avg = avg_power.filter(|p| *p > 0.0)?;
    Some(StressUnits {
        intensity_factor: intensity_factor(avg, ftp_watts),
        tss: training_stress_score(duration_minutes, avg, ftp_watts),
    })
}

/// Power-to-weight ratio in W/kg. `None` without a positive body weight.
pub fn watts_per_kg(ftp_watts: u16, weight_kg: Option<f32>) -> Option<f64> {
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    Some(round_to(ftp_watts as f64 / weight as f64, 2))
}

/// Racer category benchmark by FTP W/kg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacerCategory {
    Recreational,
    Cat4,
    Cat3,
    Cat2,
    Cat1,
    ProElite,
}

impl RacerCategory {
    /// Classify a W/kg value.
    pub fn from_wkg(wkg: f64) -> Self {
        if wkg < 2.5 {
            RacerCategory::Recreational
        } else if wkg < 3.2 {
            RacerCategory::Cat4
        } else if wkg < 4.0 {
            RacerCategory::Cat3
        } else if wkg < 4.6 {
            RacerCategory::Cat2
        } else if wkg < 5.2 {
            RacerCategory::Cat1
        } else {
            RacerCategory::ProElite
        }
    }

    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            RacerCategory::Recreational => "Cat 5 / Recreational",
            RacerCategory::Cat4 => "Cat 4",
            RacerCategory::Cat3 => "Cat 3",
            RacerCategory::Cat2 => "Cat 2",
            RacerCategory::Cat1 => "Cat 1",
            RacerCategory::ProElite => "Pro / Elite",
        }
    }
}

impl std::fmt::Display for RacerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Round half away from zero to the given number of decimals.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
