//! Time-of-day demand and the surge multiplier.
//!
//! One policy is shared by the quote engine and the data generator so the
//! training data and live prices agree on which hours are rush hours.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Default surge multiplier applied during rush hours.
pub const DEFAULT_SURGE_MULTIPLIER: f64 = 1.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandLevel {
    High,
    Normal,
}

impl DemandLevel {
    pub fn label(self) -> &'static str {
        match self {
            DemandLevel::High => "High",
            DemandLevel::Normal => "Normal",
        }
    }
}

impl fmt::Display for DemandLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rush-hour windows (inclusive hour ranges) and the fare multiplier applied
/// inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgePolicy {
    pub rush_windows: Vec<RangeInclusive<u8>>,
    pub multiplier: f64,
}

impl Default for SurgePolicy {
    fn default() -> Self {
        Self {
            rush_windows: vec![9..=11, 17..=21],
            multiplier: DEFAULT_SURGE_MULTIPLIER,
        }
    }
}

impl SurgePolicy {
    /// Policy that never surges.
    pub fn flat() -> Self {
        Self {
            rush_windows: Vec::new(),
            multiplier: 1.0,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_rush_windows(mut self, windows: Vec<RangeInclusive<u8>>) -> Self {
        self.rush_windows = windows;
        self
    }

    pub fn is_rush_hour(&self, hour: u8) -> bool {
        self.rush_windows.iter().any(|window| window.contains(&hour))
    }

    pub fn demand_at(&self, hour: u8) -> DemandLevel {
        if self.is_rush_hour(hour) {
            DemandLevel::High
        } else {
            DemandLevel::Normal
        }
    }

    /// Fare multiplier for the given hour (1.0 outside rush windows).
    pub fn multiplier_at(&self, hour: u8) -> f64 {
        match self.demand_at(hour) {
            DemandLevel::High => self.multiplier,
            DemandLevel::Normal => 1.0,
        }
    }
}
