//! Power zone calculations.
//!
//! Seven training zones defined as percentages of FTP. Watt bounds are the
//! percentage of FTP rounded half away from zero.

use serde::{Deserialize, Serialize};

/// A training zone, Z1 (recovery) to Z7 (sprint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerZone {
    Z1,
    Z2,
    Z3,
    Z4,
    Z5,
    Z6,
    Z7,
}

impl PowerZone {
    /// Zone number (1-7).
    pub fn number(&self) -> u8 {
        match self {
            PowerZone::Z1 => 1,
            PowerZone::Z2 => 2,
            PowerZone::Z3 => 3,
            PowerZone::Z4 => 4,
            PowerZone::Z5 => 5,
            PowerZone::Z6 => 6,
            PowerZone::Z7 => 7,
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            PowerZone::Z1 => "Active Recovery",
            PowerZone::Z2 => "Endurance",
            PowerZone::Z3 => "Tempo",
            PowerZone::Z4 => "Lactate Threshold",
            PowerZone::Z5 => "VO2max",
            PowerZone::Z6 => "Anaerobic Capacity",
            PowerZone::Z7 => "Neuromuscular Power",
        }
    }

    /// Percent-of-FTP bounds, inclusive.
    pub fn percent_range(&self) -> (u16, u16) {
        match self {
            PowerZone::Z1 => (0, 55),
            PowerZone::Z2 => (56, 75),
            PowerZone::Z3 => (76, 87),
            PowerZone::Z4 => (88, 94),
            PowerZone::Z5 => (95, 105),
            PowerZone::Z6 => (106, 120),
            PowerZone::Z7 => (121, 300),
        }
    }

    /// Get all zones in ascending order.
    pub fn all() -> Vec<PowerZone> {
        vec![
            PowerZone::Z1,
            PowerZone::Z2,
            PowerZone::Z3,
            PowerZone::Z4,
            PowerZone::Z5,
            PowerZone::Z6,
            PowerZone::Z7,
        ]
    }
}

impl std::fmt::Display for PowerZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z{}", self.number())
    }
}

/// A zone resolved to watts for one FTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRange {
    pub zone: PowerZone,
    pub min_percent: u16,
    pub max_percent: u16,
    pub min_watts: u32,
    pub max_watts: u32,
}

/// All seven zones for an FTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerZones {
    /// FTP the ranges were computed from
    pub ftp_watts: u16,
    zones: Vec<ZoneRange>,
}

impl PowerZones {
    /// Calculate watt ranges from FTP.
    pub fn from_ftp(ftp_watts: u16) -> Self {
        let watts = |pct: u16| (ftp_watts as f64 * pct as f64 / 100.0).round() as u32;

        let zones = PowerZone::all()
            .into_iter()
            .map(|zone| {
                let (min_percent, max_percent) = zone.percent_range();
                ZoneRange {
                    zone,
                    min_percent,
                    max_percent,
                    min_watts: watts(min_percent),
                    max_watts: watts(max_percent),
                }
            })
            .collect();

        Self { ftp_watts, zones }
    }

    /// Zone containing `power`. Gaps between rounded bounds belong to the
    /// lower zone; anything above Z6 is Z7.
    pub fn get_zone(&self, power: u32) -> PowerZone {
        self.zones
            .iter()
            .find(|z| power <= z.max_watts && z.zone != PowerZone::Z7)
            .map(|z| z.zone)
            .unwrap_or(PowerZone::Z7)
    }

    /// Watt range of one zone.
    pub fn range(&self, zone: PowerZone) -> Option<&ZoneRange> {
        self.zones.iter().find(|z| z.zone == zone)
    }

    /// All zones in ascending order.
    pub fn all_zones(&self) -> &[ZoneRange] {
        &self.zones
    }
}
