//! Ride records.

pub mod types;

pub use types::{RideEntry, RideRecord, RideSource};
