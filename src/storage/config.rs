//! Athlete profile and application configuration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::metrics::calculator::{watts_per_kg, RacerCategory};

/// Threshold power used before an athlete has saved a profile.
pub const DEFAULT_FTP_WATTS: u16 = 200;

/// Rider specialisation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AthleteType {
    #[default]
    AllAround,
    Climber,
    TimeTrialist,
    CriteriumRacer,
    EnduranceGranFondo,
    Triathlete,
    CasualFitness,
}

impl AthleteType {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            AthleteType::AllAround => "All-Around",
            AthleteType::Climber => "Climber",
            AthleteType::TimeTrialist => "Time Trialist",
            AthleteType::CriteriumRacer => "Criterium Racer",
            AthleteType::EnduranceGranFondo => "Endurance / Gran Fondo",
            AthleteType::Triathlete => "Triathlete",
            AthleteType::CasualFitness => "Casual Fitness",
        }
    }

    /// Storage key.
    pub fn key(&self) -> &'static str {
        match self {
            AthleteType::AllAround => "all_around",
            AthleteType::Climber => "climber",
            AthleteType::TimeTrialist => "time_trialist",
            AthleteType::CriteriumRacer => "criterium_racer",
            AthleteType::EnduranceGranFondo => "endurance_gran_fondo",
            AthleteType::Triathlete => "triathlete",
            AthleteType::CasualFitness => "casual_fitness",
        }
    }

    /// Get all athlete types.
    pub fn all() -> Vec<AthleteType> {
        vec![
            AthleteType::AllAround,
            AthleteType::Climber,
            AthleteType::TimeTrialist,
            AthleteType::CriteriumRacer,
            AthleteType::EnduranceGranFondo,
            AthleteType::Triathlete,
            AthleteType::CasualFitness,
        ]
    }
}

impl std::fmt::Display for AthleteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for AthleteType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AthleteType::all()
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("Unknown athlete type: {}", s))
    }
}

/// Athlete profile with threshold power and goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Owning athlete
    pub athlete_id: Uuid,
    /// Functional Threshold Power in watts
    pub ftp_watts: u16,
    /// Weight in kilograms
    pub weight_kg: Option<f32>,
    /// Specialisation
    pub athlete_type: AthleteType,
    /// Goal event name
    pub goal_event: Option<String>,
    /// Goal event date
    pub goal_date: Option<NaiveDate>,
    /// Date of the last threshold test
    pub ftp_tested_date: Option<NaiveDate>,
    /// Profile creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl AthleteProfile {
    /// Create a profile with the given threshold power.
    pub fn new(athlete_id: Uuid, ftp_watts: u16) -> Self {
        let now = Utc::now();
        Self {
            athlete_id,
            ftp_watts,
            weight_kg: None,
            athlete_type: AthleteType::default(),
            goal_event: None,
            goal_date: None,
            ftp_tested_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set body weight.
    pub fn with_weight(mut self, weight_kg: f32) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Set specialisation.
    pub fn with_athlete_type(mut self, athlete_type: AthleteType) -> Self {
        self.athlete_type = athlete_type;
        self
    }

    /// Set goal event and date.
    pub fn with_goal(mut self, event: &str, date: Option<NaiveDate>) -> Self {
        self.goal_event = Some(event.to_string());
        self.goal_date = date;
        self
    }

    /// Record a retest result.
    pub fn retest(&mut self, ftp_watts: u16, tested_on: NaiveDate) {
        self.ftp_watts = ftp_watts;
        self.ftp_tested_date = Some(tested_on);
        self.updated_at = Utc::now();
    }

    /// Power-to-weight ratio, if weight is known.
    pub fn watts_per_kg(&self) -> Option<f64> {
        watts_per_kg(self.ftp_watts, self.weight_kg)
    }

    /// Racer category from power-to-weight, if weight is known.
    pub fn racer_category(&self) -> Option<RacerCategory> {
        self.watts_per_kg().map(RacerCategory::from_wkg)
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Athlete settings
    pub athlete: AthleteSettings,
    /// Engine settings
    pub engine: EngineSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            athlete: AthleteSettings::default(),
            engine: EngineSettings::default(),
        }
    }
}

impl AppConfig {
    /// Path of the SQLite database inside the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("rideload.db")
    }
}

/// Athlete-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteSettings {
    /// Athlete the binary operates on
    pub athlete_id: Uuid,
    /// Threshold power used until a profile is saved
    pub default_ftp_watts: u16,
}

impl Default for AthleteSettings {
    fn default() -> Self {
        Self {
            athlete_id: Uuid::nil(),
            default_ftp_watts: DEFAULT_FTP_WATTS,
        }
    }
}

/// Engine-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Days of PMC history reported
    pub pmc_days: usize,
    /// Days of ride history listed in summaries
    pub history_days: i64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            pmc_days: 90,
            history_days: 28,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "rideload", "RideLoad")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path(), get_data_dir())
}

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist.
pub fn load_config_from(path: &PathBuf, data_dir: PathBuf) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        let config = AppConfig {
            data_dir,
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &PathBuf) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
