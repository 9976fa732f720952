//! Fare calculation and ranking weights.

use serde::{Deserialize, Serialize};

use crate::vehicle::{FareProfile, VehicleClass};

/// Default weight of ETA (minutes) in the balanced score.
pub const BALANCED_ETA_WEIGHT: f64 = 0.6;

/// Default weight of fare (currency units) in the balanced score.
pub const BALANCED_FARE_WEIGHT: f64 = 0.04;

/// Number of options returned to the rider.
pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fare profile per vehicle class, indexed by [`VehicleClass::index`].
    pub fare_profiles: [FareProfile; VehicleClass::COUNT],
    pub balanced_eta_weight: f64,
    pub balanced_fare_weight: f64,
    pub top_k: usize,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fare_profiles: VehicleClass::ALL.map(VehicleClass::default_fare_profile),
            balanced_eta_weight: BALANCED_ETA_WEIGHT,
            balanced_fare_weight: BALANCED_FARE_WEIGHT,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl PricingConfig {
    pub fn with_fare_profile(mut self, vehicle: VehicleClass, profile: FareProfile) -> Self {
        self.fare_profiles[vehicle.index()] = profile;
        self
    }

    pub fn with_balanced_weights(mut self, eta_weight: f64, fare_weight: f64) -> Self {
        self.balanced_eta_weight = eta_weight;
        self.balanced_fare_weight = fare_weight;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn fare_profile(&self, vehicle: VehicleClass) -> FareProfile {
        self.fare_profiles[vehicle.index()]
    }

    /// Fare before rounding: `(base + distance_km * per_km) * surge_multiplier`.
    pub fn raw_fare(&self, vehicle: VehicleClass, distance_km: f64, surge_multiplier: f64) -> f64 {
        let profile = self.fare_profile(vehicle);
        (profile.base + distance_km * profile.per_km) * surge_multiplier
    }

    /// Fare rounded to whole currency units.
    pub fn fare(&self, vehicle: VehicleClass, distance_km: f64, surge_multiplier: f64) -> u32 {
        self.raw_fare(vehicle, distance_km, surge_multiplier)
            .round()
            .max(0.0) as u32
    }

    /// Balanced ranking score; lower is better.
    pub fn balanced_score(&self, eta_min: f64, fare: u32) -> f64 {
        eta_min * self.balanced_eta_weight + f64::from(fare) * self.balanced_fare_weight
    }
}
