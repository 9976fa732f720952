//! Vehicle classes offered by the service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of vehicle classes. Declaration order is the order in which
/// the engine evaluates classes and breaks ranking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleClass {
    Bike,
    Auto,
    Mini,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
}

/// Base fare and per-km rate, in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareProfile {
    pub base: f64,
    pub per_km: f64,
}

impl FareProfile {
    pub const fn new(base: f64, per_km: f64) -> Self {
        Self { base, per_km }
    }
}

impl VehicleClass {
    pub const COUNT: usize = 5;

    pub const ALL: [VehicleClass; Self::COUNT] = [
        VehicleClass::Bike,
        VehicleClass::Auto,
        VehicleClass::Mini,
        VehicleClass::Sedan,
        VehicleClass::Suv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VehicleClass::Bike => "Bike",
            VehicleClass::Auto => "Auto",
            VehicleClass::Mini => "Mini",
            VehicleClass::Sedan => "Sedan",
            VehicleClass::Suv => "SUV",
        }
    }

    /// Position in [`VehicleClass::ALL`].
    pub fn index(self) -> usize {
        match self {
            VehicleClass::Bike => 0,
            VehicleClass::Auto => 1,
            VehicleClass::Mini => 2,
            VehicleClass::Sedan => 3,
            VehicleClass::Suv => 4,
        }
    }

    pub fn default_fare_profile(self) -> FareProfile {
        match self {
            VehicleClass::Bike => FareProfile::new(20.0, 5.0),
            VehicleClass::Auto => FareProfile::new(30.0, 8.0),
            VehicleClass::Mini => FareProfile::new(50.0, 12.0),
            VehicleClass::Sedan => FareProfile::new(70.0, 15.0),
            VehicleClass::Suv => FareProfile::new(100.0, 20.0),
        }
    }

    /// Typical free-flow city speed, used to synthesize trip durations.
    pub fn typical_speed_kmh(self) -> f64 {
        match self {
            VehicleClass::Bike => 42.0,
            VehicleClass::Auto => 28.0,
            VehicleClass::Mini => 32.0,
            VehicleClass::Sedan => 38.0,
            VehicleClass::Suv => 35.0,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVehicleClass(pub String);

impl fmt::Display for UnknownVehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vehicle class `{}`", self.0)
    }
}

impl std::error::Error for UnknownVehicleClass {}

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleClass::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| UnknownVehicleClass(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_all_order() {
        for (i, class) in VehicleClass::ALL.iter().enumerate() {
            assert_eq!(class.index(), i);
        }
    }

    #[test]
    fn names_parse_back() {
        for class in VehicleClass::ALL {
            assert_eq!(class.name().parse::<VehicleClass>(), Ok(class));
        }
        assert!("Rickshaw".parse::<VehicleClass>().is_err());
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&VehicleClass::Suv).expect("serialize");
        assert_eq!(json, "\"SUV\"");
        let back: VehicleClass = serde_json::from_str("\"Sedan\"").expect("deserialize");
        assert_eq!(back, VehicleClass::Sedan);
    }

    #[test]
    fn fares_increase_with_class() {
        let bases: Vec<f64> = VehicleClass::ALL
            .iter()
            .map(|c| c.default_fare_profile().base)
            .collect();
        assert!(bases.windows(2).all(|w| w[0] < w[1]));
    }
}
