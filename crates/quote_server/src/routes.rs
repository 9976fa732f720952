//! HTTP routes: the HTML console, the JSON quote endpoint and health.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use quote_core::geo::{round_to, trip_distance_km};
use quote_core::{Coordinate, QuoteEngine, RankingPreference, TripRequest, VehicleQuote};

use crate::error::ApiError;
use crate::html;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QuoteEngine>,
}

impl AppState {
    pub fn new(engine: QuoteEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/test", post(test_form))
        .route("/predict_ride", post(predict_ride))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Body of `POST /predict_ride`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRideRequest {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    /// Defaults to the current local hour.
    #[serde(default)]
    pub hour: Option<i64>,
    #[serde(default)]
    pub preference: Option<String>,
}

/// Fields of the console form.
#[derive(Debug, Clone, Deserialize)]
pub struct TestForm {
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub hour: i64,
    #[serde(default)]
    pub preference: String,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    model_ready: bool,
}

fn current_local_hour() -> i64 {
    i64::from(chrono::Local::now().hour())
}

fn trip_request(
    pickup: Coordinate,
    drop: Coordinate,
    hour: i64,
    preference: Option<&str>,
) -> Result<TripRequest, ApiError> {
    let hour = u8::try_from(hour)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or_else(|| {
            ApiError::bad_request(format!("hour must be between 0 and 23, got {hour}"))
        })?;
    let preference = preference
        .map(RankingPreference::parse_lenient)
        .unwrap_or_default();
    Ok(TripRequest::new(pickup, drop, hour).with_preference(preference))
}

async fn home() -> Html<String> {
    Html(html::render_home())
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        model_ready: state.engine.is_ready(),
    })
}

async fn predict_ride(
    State(state): State<AppState>,
    body: Result<Json<PredictRideRequest>, JsonRejection>,
) -> Result<Json<Vec<VehicleQuote>>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let request = trip_request(
        Coordinate::new(body.start_lat, body.start_lon),
        Coordinate::new(body.end_lat, body.end_lon),
        body.hour.unwrap_or_else(current_local_hour),
        body.preference.as_deref(),
    )?;
    let quotes = state.engine.rank(&request)?;
    debug!(count = quotes.len(), "predict_ride served");
    Ok(Json(quotes))
}

async fn test_form(
    State(state): State<AppState>,
    form: Result<Form<TestForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, Html(html::render_error(&rejection.body_text())))
                .into_response();
        }
    };

    let pickup = Coordinate::new(form.start_lat, form.start_lon);
    let drop = Coordinate::new(form.end_lat, form.end_lon);
    let ranked = trip_request(pickup, drop, form.hour, Some(&form.preference))
        .and_then(|request| Ok((request, state.engine.rank(&request)?)));

    match ranked {
        Ok((request, quotes)) => {
            let distance = round_to(trip_distance_km(pickup, drop), 2);
            let surge = state.engine.surge_policy().multiplier_at(request.hour);
            Html(html::render_results(distance, surge, &quotes)).into_response()
        }
        Err(err) => (err.status, Html(html::render_error(&err.message))).into_response(),
    }
}
