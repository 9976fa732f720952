//! Coordinates and the distance estimate used for pricing and features.
//!
//! The service covers a few kilometres, so distances are taken as the
//! Euclidean length of the lat/lon delta scaled by a fixed km-per-degree
//! factor rather than a great-circle formula.

use serde::{Deserialize, Serialize};

/// Kilometres per degree (small-angle approximation).
pub const KM_PER_DEGREE: f64 = 111.0;

/// Shortest distance ever reported or priced.
pub const MIN_TRIP_DISTANCE_KM: f64 = 0.5;

/// Default bounding box: Udupi / Manipal.
const DEFAULT_LAT_MIN: f64 = 13.3200;
const DEFAULT_LAT_MAX: f64 = 13.3700;
const DEFAULT_LON_MIN: f64 = 74.7200;
const DEFAULT_LON_MAX: f64 = 74.8000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Service area used by the data generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            lat_min: DEFAULT_LAT_MIN,
            lat_max: DEFAULT_LAT_MAX,
            lon_min: DEFAULT_LON_MIN,
            lon_max: DEFAULT_LON_MAX,
        }
    }
}

impl BoundingBox {
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.lat)
            && (self.lon_min..=self.lon_max).contains(&point.lon)
    }
}

/// Raw straight-line distance in km, without the minimum clamp.
pub fn raw_distance_km(pickup: Coordinate, drop: Coordinate) -> f64 {
    let dlat = drop.lat - pickup.lat;
    let dlon = drop.lon - pickup.lon;
    (dlat * dlat + dlon * dlon).sqrt() * KM_PER_DEGREE
}

/// Trip distance in km, floored at [`MIN_TRIP_DISTANCE_KM`].
pub fn trip_distance_km(pickup: Coordinate, drop: Coordinate) -> f64 {
    clamp_distance_km(raw_distance_km(pickup, drop))
}

pub fn clamp_distance_km(distance_km: f64) -> f64 {
    distance_km.max(MIN_TRIP_DISTANCE_KM)
}

/// Round to a fixed number of decimal places (half away from zero).
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_points_clamp_to_minimum() {
        let p = Coordinate::new(13.34, 74.748);
        assert_eq!(trip_distance_km(p, p), MIN_TRIP_DISTANCE_KM);
        assert_eq!(raw_distance_km(p, p), 0.0);
    }

    #[test]
    fn distance_scales_with_degree_delta() {
        let a = Coordinate::new(13.34, 74.74);
        let b = Coordinate::new(13.35, 74.74);
        assert!((trip_distance_km(a, b) - 1.11).abs() < 1e-9);
    }

    #[test]
    fn short_hops_are_floored() {
        let a = Coordinate::new(13.34, 74.74);
        let b = Coordinate::new(13.342, 74.74);
        assert!(raw_distance_km(a, b) < MIN_TRIP_DISTANCE_KM);
        assert_eq!(trip_distance_km(a, b), MIN_TRIP_DISTANCE_KM);
    }

    #[test]
    fn round_to_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(7.25, 1), 7.3);
        assert_eq!(round_to(13.34567, 4), 13.3457);
    }

    #[test]
    fn default_box_contains_manipal() {
        let bbox = BoundingBox::default();
        assert!(bbox.contains(Coordinate::new(13.3516, 74.7421)));
        assert!(!bbox.contains(Coordinate::new(12.97, 77.59)));
    }
}
