//! Storage module for database, repository and configuration.

pub mod config;
pub mod database;
pub mod repository;
pub mod schema;
pub mod training_store;

pub use config::{AppConfig, AthleteProfile, AthleteType, ConfigError};
pub use database::{Database, DatabaseError};
pub use repository::TrainingRepository;
pub use training_store::TrainingStore;
