//! The quote engine: distance, demand, per-class ETA and fare, ranking.
//!
//! [`QuoteEngine`] is built once at process start and shared read-only by
//! every request. When the model could not be loaded the engine still
//! exists, in the [`ModelState::Unavailable`] state, and answers every call
//! with [`QuoteError::ModelUnavailable`].

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::demand::{DemandLevel, SurgePolicy};
use crate::error::QuoteError;
use crate::geo::{round_to, trip_distance_km, Coordinate};
use crate::model::{load_trained_model, ArtifactPaths, TrainedModel};
use crate::pricing::PricingConfig;
use crate::ranking::{rank_quotes, RankingPreference};
use crate::vehicle::VehicleClass;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub pickup: Coordinate,
    pub drop: Coordinate,
    /// Hour of day, 0–23.
    pub hour: u8,
    #[serde(default)]
    pub preference: RankingPreference,
}

impl TripRequest {
    pub fn new(pickup: Coordinate, drop: Coordinate, hour: u8) -> Self {
        Self {
            pickup,
            drop,
            hour,
            preference: RankingPreference::default(),
        }
    }

    pub fn with_preference(mut self, preference: RankingPreference) -> Self {
        self.preference = preference;
        self
    }

    fn validate(&self) -> Result<(), QuoteError> {
        if !self.pickup.is_finite() || !self.drop.is_finite() {
            return Err(QuoteError::InvalidRequest(
                "coordinates must be finite numbers".to_string(),
            ));
        }
        if self.hour > 23 {
            return Err(QuoteError::InvalidRequest(format!(
                "hour must be between 0 and 23, got {}",
                self.hour
            )));
        }
        Ok(())
    }
}

/// One priced option for a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleQuote {
    pub vehicle: VehicleClass,
    /// Predicted trip duration in minutes, one decimal.
    pub eta: f64,
    /// Fare in whole currency units.
    pub fare: u32,
    /// Trip distance in km, two decimals.
    pub distance: f64,
    pub demand: DemandLevel,
}

#[derive(Debug)]
pub enum ModelState {
    Ready(TrainedModel),
    Unavailable { reason: String },
}

#[derive(Debug)]
pub struct QuoteEngine {
    model: ModelState,
    pricing: PricingConfig,
    surge: SurgePolicy,
}

impl QuoteEngine {
    pub fn new(model: TrainedModel) -> Self {
        Self::with_state(ModelState::Ready(model))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_state(ModelState::Unavailable {
            reason: reason.into(),
        })
    }

    fn with_state(model: ModelState) -> Self {
        Self {
            model,
            pricing: PricingConfig::default(),
            surge: SurgePolicy::default(),
        }
    }

    /// Load the persisted model. A failed load is logged and produces an
    /// engine in the unavailable state rather than an error.
    pub fn from_artifacts(paths: &ArtifactPaths) -> Self {
        match load_trained_model(paths) {
            Ok(model) => {
                info!(
                    model = %paths.model_path.display(),
                    columns = model.schema().len(),
                    "loaded ETA model"
                );
                Self::new(model)
            }
            Err(err) => {
                error!(
                    model = %paths.model_path.display(),
                    error = %err,
                    "failed to load ETA model; quotes are unavailable"
                );
                Self::unavailable(err.to_string())
            }
        }
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_surge_policy(mut self, surge: SurgePolicy) -> Self {
        self.surge = surge;
        self
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.model, ModelState::Ready(_))
    }

    pub fn state(&self) -> &ModelState {
        &self.model
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn surge_policy(&self) -> &SurgePolicy {
        &self.surge
    }

    /// Quote every vehicle class, in class order.
    pub fn quote_all(&self, request: &TripRequest) -> Result<Vec<VehicleQuote>, QuoteError> {
        let model = match &self.model {
            ModelState::Ready(model) => model,
            ModelState::Unavailable { reason } => {
                return Err(QuoteError::ModelUnavailable(reason.clone()));
            }
        };
        request.validate()?;

        let distance_km = trip_distance_km(request.pickup, request.drop);
        let demand = self.surge.demand_at(request.hour);
        let surge_multiplier = self.surge.multiplier_at(request.hour);

        VehicleClass::ALL
            .into_iter()
            .map(|vehicle| -> Result<VehicleQuote, QuoteError> {
                let eta = model
                    .predict_eta(request.hour, distance_km, vehicle)
                    .map_err(|err| QuoteError::Inference(format!("{vehicle}: {err}")))?;
                if !eta.is_finite() {
                    return Err(QuoteError::Inference(format!(
                        "{vehicle}: model returned a non-finite ETA"
                    )));
                }
                Ok(VehicleQuote {
                    vehicle,
                    eta: round_to(eta, 1),
                    fare: self.pricing.fare(vehicle, distance_km, surge_multiplier),
                    distance: round_to(distance_km, 2),
                    demand,
                })
            })
            .collect()
    }

    /// The best options for the request's preference, at most
    /// [`PricingConfig::top_k`] of them.
    pub fn rank(&self, request: &TripRequest) -> Result<Vec<VehicleQuote>, QuoteError> {
        let quotes = self.quote_all(request)?;
        let ranked = rank_quotes(quotes, request.preference, &self.pricing);
        debug!(
            preference = %request.preference,
            hour = request.hour,
            returned = ranked.len(),
            "ranked vehicle quotes"
        );
        Ok(ranked)
    }
}
