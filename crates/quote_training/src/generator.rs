//! Synthetic ride generator.
//!
//! Rides are sampled uniformly inside the service bounding box. Duration
//! follows a per-class typical speed with driver variance, a traffic factor
//! during rush hours and additive noise; fares use the same fare profiles
//! and surge rule as the live engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use quote_core::geo::{clamp_distance_km, raw_distance_km, round_to};
use quote_core::{BoundingBox, Coordinate, PricingConfig, SurgePolicy, VehicleClass};

use crate::dataset::TripRecord;
use crate::distributions::{normal, uniform};

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub samples: usize,
    /// `None` seeds from OS entropy, so every run differs.
    pub seed: Option<u64>,
    pub bounds: BoundingBox,
    /// First and last hour (inclusive) a ride may start.
    pub first_hour: u8,
    pub last_hour: u8,
    /// Range of the duration multiplier applied during rush hours.
    pub traffic_factor: (f64, f64),
    /// Range of the per-ride speed multiplier.
    pub speed_variance: (f64, f64),
    /// Mean and standard deviation of the additive duration noise (minutes).
    pub noise: (f64, f64),
    pub min_duration_min: f64,
    pub surge: SurgePolicy,
    pub pricing: PricingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 10_000,
            seed: None,
            bounds: BoundingBox::default(),
            first_hour: 6,
            last_hour: 23,
            traffic_factor: (1.2, 1.8),
            speed_variance: (0.85, 1.15),
            noise: (1.0, 2.2),
            min_duration_min: 2.5,
            surge: SurgePolicy::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_surge_policy(mut self, surge: SurgePolicy) -> Self {
        self.surge = surge;
        self
    }
}

/// Generate `config.samples` rides.
pub fn generate_trips(config: &GeneratorConfig) -> Vec<TripRecord> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let trips: Vec<TripRecord> = (0..config.samples)
        .map(|_| sample_trip(&mut rng, config))
        .collect();

    let rush = trips
        .iter()
        .filter(|t| config.surge.is_rush_hour(t.hour_of_day))
        .count();
    info!(
        samples = trips.len(),
        rush_hour_rides = rush,
        seed = ?config.seed,
        "generated synthetic rides"
    );
    trips
}

fn sample_point<R: Rng>(rng: &mut R, bounds: &BoundingBox) -> Coordinate {
    Coordinate::new(
        round_to(uniform(rng, bounds.lat_min, bounds.lat_max), 4),
        round_to(uniform(rng, bounds.lon_min, bounds.lon_max), 4),
    )
}

fn sample_trip<R: Rng>(rng: &mut R, config: &GeneratorConfig) -> TripRecord {
    let start = sample_point(rng, &config.bounds);
    let end = sample_point(rng, &config.bounds);
    let distance = clamp_distance_km(round_to(raw_distance_km(start, end), 2));

    let hour = rng.gen_range(config.first_hour..=config.last_hour);
    let vehicle = VehicleClass::ALL[rng.gen_range(0..VehicleClass::COUNT)];

    let traffic = if config.surge.is_rush_hour(hour) {
        uniform(rng, config.traffic_factor.0, config.traffic_factor.1)
    } else {
        1.0
    };
    let variance = uniform(rng, config.speed_variance.0, config.speed_variance.1);
    let speed = vehicle.typical_speed_kmh() * variance;
    let base_duration = distance / speed * 60.0 * traffic;
    let noisy = base_duration + normal(rng, config.noise.0, config.noise.1);
    let duration = round_to(noisy, 1).max(config.min_duration_min);

    let fare = config
        .pricing
        .fare(vehicle, distance, config.surge.multiplier_at(hour));

    TripRecord {
        start_lat: start.lat,
        start_lon: start.lon,
        end_lat: end.lat,
        end_lon: end.lon,
        hour_of_day: hour,
        vehicle_type: vehicle,
        trip_distance: distance,
        duration_min: duration,
        fare,
    }
}
