//! Quote engine for a fixed micro-region ride-hailing service.
//!
//! Given a pickup, a drop, an hour of day and a ranking preference, the
//! engine estimates the trip distance, asks a trained regressor for the ETA
//! of every vehicle class, prices each class with the surge rule and
//! returns the best three options.
//!
//! - [`geo`]: coordinates, bounding box and the flat-earth distance estimate
//! - [`vehicle`]: the five vehicle classes and their fare/speed profiles
//! - [`demand`]: rush-hour windows and the surge multiplier
//! - [`pricing`]: fare formula and ranking weights
//! - [`features`]: typed mapping between model columns and trip features
//! - [`model`]: regression trees, the random forest and artifact persistence
//! - [`ranking`]: ranking preferences and ordering
//! - [`engine`]: the [`QuoteEngine`] service object

pub mod demand;
pub mod engine;
pub mod error;
pub mod features;
pub mod geo;
pub mod model;
pub mod pricing;
pub mod ranking;
pub mod vehicle;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use demand::{DemandLevel, SurgePolicy};
pub use engine::{ModelState, QuoteEngine, TripRequest, VehicleQuote};
pub use error::{ModelError, QuoteError, SchemaError};
pub use features::FeatureSchema;
pub use geo::{BoundingBox, Coordinate};
pub use model::{ArtifactPaths, EtaRegressor, ForestConfig, RandomForest, TrainedModel};
pub use pricing::PricingConfig;
pub use ranking::RankingPreference;
pub use vehicle::VehicleClass;
