//! Phase templates.
//!
//! Each phase carries a weekly stress range, its primary workout types, and
//! day-count-keyed workout ID lists for a normal and a deload week.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::Phase;
use crate::workouts::WorkoutType;

/// Template a plan is generated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTemplate {
    /// Phase identifier
    pub phase: Phase,
    /// Display label
    pub label: String,
    /// Short description
    pub description: String,
    /// Suggested plan length in weeks
    pub default_weeks: u32,
    /// Target weekly TSS range (min, max)
    pub weekly_stress_range: (u32, u32),
    /// Workout types the phase emphasises
    pub primary_types: Vec<WorkoutType>,
    /// Final week is a taper and uses the deload template
    pub taper_final_week: bool,
    /// Normal-week workout IDs keyed by days per week
    pub weekly_structure: BTreeMap<u8, Vec<String>>,
    /// Deload-week workout IDs keyed by days per week
    pub deload_structure: BTreeMap<u8, Vec<String>>,
}

impl PhaseTemplate {
    /// Workout IDs for a week, empty when the day count has no template.
    pub fn week_template(&self, days_per_week: u8, deload: bool) -> &[String] {
        let table = if deload {
            &self.deload_structure
        } else {
            &self.weekly_structure
        };
        table.get(&days_per_week).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Read-only access to phase templates.
pub trait PhaseCatalog {
    /// All templates.
    fn templates(&self) -> &[PhaseTemplate];

    /// Template for a phase.
    fn template(&self, phase: Phase) -> Option<&PhaseTemplate> {
        self.templates().iter().find(|t| t.phase == phase)
    }
}

/// The phase templates shipped with the engine.
pub struct BuiltInPhases {
    templates: Vec<PhaseTemplate>,
}

impl BuiltInPhases {
    /// Create the built-in phase catalog.
    pub fn new() -> Self {
        Self {
            templates: vec![base_phase(), build_phase(), specialty_phase()],
        }
    }
}

impl Default for BuiltInPhases {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseCatalog for BuiltInPhases {
    fn templates(&self) -> &[PhaseTemplate] {
        &self.templates
    }
}

fn structure(rows: Vec<(u8, Vec<&str>)>) -> BTreeMap<u8, Vec<String>> {
    rows.into_iter()
        .map(|(days, ids)| (days, ids.into_iter().map(String::from).collect()))
        .collect()
}

fn standard_deload() -> BTreeMap<u8, Vec<String>> {
    structure(vec![
        (3, vec!["recovery_30", "endurance_60", "recovery_45"]),
        (4, vec!["recovery_30", "recovery_45", "endurance_60", "recovery_30"]),
        (5, vec!["recovery_30", "recovery_45", "endurance_60", "recovery_30", "recovery_45"]),
        (6, vec!["recovery_30", "recovery_45", "endurance_60", "recovery_30", "recovery_45", "endurance_60"]),
    ])
}

fn base_phase() -> PhaseTemplate {
    PhaseTemplate {
        phase: Phase::Base,
        label: "Base Phase".to_string(),
        description: "Build the aerobic engine with Z2 endurance and sweet spot work. \
                      Volume rises over 8 weeks with a deload every 4th week."
            .to_string(),
        default_weeks: 8,
        weekly_stress_range: (300, 450),
        primary_types: vec![WorkoutType::Endurance, WorkoutType::SweetSpot, WorkoutType::Tempo],
        taper_final_week: false,
        weekly_structure: structure(vec![
            (3, vec!["endurance_60", "ss_60_2x15", "endurance_90"]),
            (4, vec!["recovery_30", "endurance_60", "ss_60_2x15", "endurance_90"]),
            (5, vec!["recovery_30", "endurance_60", "ss_60_2x15", "tempo_60_3x10", "endurance_90"]),
            (6, vec!["recovery_30", "endurance_60", "ss_60_2x15", "tempo_60_3x10", "endurance_90", "ss_75_3x12"]),
        ]),
        deload_structure: standard_deload(),
    }
}

fn build_phase() -> PhaseTemplate {
    PhaseTemplate {
        phase: Phase::Build,
        label: "Build Phase".to_string(),
        description: "Raise threshold and VO2max with harder structured work on top of \
                      an aerobic base. Deload every 4th week."
            .to_string(),
        default_weeks: 8,
        weekly_stress_range: (400, 550),
        primary_types: vec![WorkoutType::Threshold, WorkoutType::Vo2max, WorkoutType::SweetSpot],
        taper_final_week: false,
        weekly_structure: structure(vec![
            (3, vec!["endurance_60", "threshold_60_2x10", "vo2_45_5x3"]),
            (4, vec!["recovery_30", "endurance_60", "threshold_60_2x10", "vo2_45_5x3"]),
            (5, vec!["recovery_30", "endurance_60", "ss_60_2x15", "threshold_60_2x10", "vo2_45_5x3"]),
            (6, vec!["recovery_30", "endurance_60", "ss_75_3x12", "threshold_75_20min", "vo2_60_4x5", "endurance_90"]),
        ]),
        deload_structure: standard_deload(),
    }
}

fn specialty_phase() -> PhaseTemplate {
    PhaseTemplate {
        phase: Phase::Specialty,
        label: "Specialty / Peak Phase".to_string(),
        description: "Sharpen for the goal event. High intensity with anaerobic work, \
                      ending in a taper week."
            .to_string(),
        default_weeks: 4,
        weekly_stress_range: (350, 500),
        primary_types: vec![WorkoutType::Anaerobic, WorkoutType::Vo2max, WorkoutType::Threshold],
        taper_final_week: true,
        weekly_structure: structure(vec![
            (3, vec!["endurance_60", "vo2_45_5x3", "anaerobic_45_8x1"]),
            (4, vec!["recovery_30", "endurance_60", "vo2_60_4x5", "anaerobic_45_8x1"]),
            (5, vec!["recovery_30", "endurance_60", "ss_60_2x15", "vo2_60_4x5", "anaerobic_45_8x1"]),
            (6, vec!["recovery_30", "endurance_60", "threshold_60_2x10", "vo2_60_4x5", "anaerobic_45_8x1", "endurance_90"]),
        ]),
        deload_structure: structure(vec![
            (3, vec!["recovery_30", "endurance_60", "recovery_45"]),
            (4, vec!["recovery_30", "recovery_30", "endurance_60", "recovery_30"]),
            (5, vec!["recovery_30", "recovery_30", "endurance_60", "recovery_30", "recovery_45"]),
            (6, vec!["recovery_30", "recovery_30", "endurance_60", "recovery_30", "recovery_45", "endurance_60"]),
        ]),
    }
}
