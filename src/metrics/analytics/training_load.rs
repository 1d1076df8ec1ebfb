//! Training Load calculations (CTL/ATL/TSB).
//!
//! Implements the Performance Management Chart (PMC) model as a two-pole
//! leaky integrator over daily TSS:
//! - CTL (Fitness): 42-day time-constant exponential average
//! - ATL (Fatigue): 7-day time-constant exponential average
//! - TSB (Form): yesterday's CTL - yesterday's ATL

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rides::RideRecord;

/// Days of history walked before the reporting window to prime CTL.
pub const PRIMING_DAYS: i64 = 42;

/// Longest reporting window; larger requests are clamped to it.
pub const MAX_SERIES_DAYS: usize = 3650;

/// One day of the performance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmcPoint {
    /// Calendar date.
    pub date: NaiveDate,
    /// Total TSS for the day.
    pub tss: f64,
    /// Chronic Training Load after the day's training.
    pub ctl: f64,
    /// Acute Training Load after the day's training.
    pub atl: f64,
    /// Training Stress Balance going into the day.
    pub tsb: f64,
}

/// Form classification from TSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormStatus {
    /// TSB >= 10
    Fresh,
    /// 0 <= TSB < 10
    Neutral,
    /// -20 <= TSB < 0
    Productive,
    /// -30 <= TSB < -20
    Tired,
    /// TSB < -30
    VeryTired,
}

impl FormStatus {
    /// Classify a TSB value.
    pub fn from_tsb(tsb: f64) -> Self {
        if tsb >= 10.0 {
            FormStatus::Fresh
        } else if tsb >= 0.0 {
            FormStatus::Neutral
        } else if tsb >= -20.0 {
            FormStatus::Productive
        } else if tsb >= -30.0 {
            FormStatus::Tired
        } else {
            FormStatus::VeryTired
        }
    }

    /// Get recommendation text.
    pub fn recommendation(&self) -> &'static str {
        match self {
            FormStatus::Fresh => "Fresh - consider a hard day or race",
            FormStatus::Neutral => "Neutral - good training zone",
            FormStatus::Productive => "Productive fatigue - training adaptation zone",
            FormStatus::Tired => "Tired - reduce intensity or volume",
            FormStatus::VeryTired => "Very tired - rest day strongly recommended",
        }
    }
}

/// Impulse-response training load model.
pub struct PerformanceManager {
    /// CTL time constant (default: 42 days).
    ctl_days: f64,
    /// ATL time constant (default: 7 days).
    atl_days: f64,
}

impl PerformanceManager {
    /// Create with default constants (42/7 day).
    pub fn new() -> Self {
        Self {
            ctl_days: 42.0,
            atl_days: 7.0,
        }
    }

    /// Create with custom time constants.
    pub fn with_constants(ctl_days: f64, atl_days: f64) -> Self {
        Self { ctl_days, atl_days }
    }

    /// Advance the filter by one day.
    ///
    /// `prev` holds the accumulators after the previous day. The returned
    /// point's TSB is taken from `prev`, before `today_tss` is applied.
    pub fn step(&self, prev: (f64, f64), date: NaiveDate, today_tss: f64) -> PmcPoint {
        let (prev_ctl, prev_atl) = prev;
        PmcPoint {
            date,
            tss: today_tss,
            ctl: prev_ctl + (today_tss - prev_ctl) / self.ctl_days,
            atl: prev_atl + (today_tss - prev_atl) / self.atl_days,
            tsb: prev_ctl - prev_atl,
        }
    }

    /// Dense daily series for the `days` days ending at `end` (inclusive).
    ///
    /// The walk starts `PRIMING_DAYS` before the window with both
    /// accumulators at zero; only the trailing `days` points are returned.
    /// Dates missing from `daily_tss` contribute zero stress. `days` is
    /// clamped to [`MAX_SERIES_DAYS`].
    pub fn series(
        &self,
        daily_tss: &BTreeMap<NaiveDate, f64>,
        end: NaiveDate,
        days: usize,
    ) -> Vec<PmcPoint> {
        let days = days.min(MAX_SERIES_DAYS);
        if days == 0 {
            return Vec::new();
        }

        let start = Self::history_start(end, days);
        let total_days = (end - start).num_days() + 1;

        let mut points = Vec::with_capacity(total_days as usize);
        let mut acc = (0.0, 0.0);
        let mut current = start;
        while current <= end {
            let tss = daily_tss.get(&current).copied().unwrap_or(0.0);
            let point = self.step(acc, current, tss);
            acc = (point.ctl, point.atl);
            points.push(point);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        points.split_off(points.len().saturating_sub(days))
    }

    /// First date the series walk needs rides from.
    pub fn history_start(end: NaiveDate, days: usize) -> NaiveDate {
        let span = days.min(MAX_SERIES_DAYS) as i64 + PRIMING_DAYS - 1;
        end.checked_sub_signed(Duration::days(span))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for PerformanceManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum ride TSS by calendar date. Rides without TSS are skipped.
pub fn daily_stress(rides: &[RideRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut daily = BTreeMap::new();
    for ride in rides {
        if let Some(tss) = ride.tss {
            *daily.entry(ride.ride_date).or_insert(0.0) += tss;
        }
    }
    daily
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sum of daily stress over the 7-day window starting at `week_start`.
pub fn weekly_stress_sum(daily_tss: &BTreeMap<NaiveDate, f64>, week_start: NaiveDate) -> f64 {
    let week_end = week_start + Duration::days(7);
    daily_tss.range(week_start..week_end).map(|(_, tss)| tss).sum()
}
