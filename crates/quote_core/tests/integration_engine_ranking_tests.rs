mod support;

use quote_core::test_helpers::{stub_engine, TEST_DROP_DOUBLED, TEST_PICKUP};
use quote_core::{DemandLevel, QuoteError, RankingPreference, TripRequest, VehicleClass};

use support::{etas, fares, off_peak_request, request_with, rush_request, same_point_request};

#[test]
fn every_preference_returns_three_complete_quotes() {
    let engine = stub_engine();
    for preference in [
        RankingPreference::Cheapest,
        RankingPreference::Balanced,
        RankingPreference::Fastest,
    ] {
        let ranked = engine.rank(&request_with(preference, 14)).expect("ranked");
        assert_eq!(ranked.len(), 3, "{preference}");
        for quote in &ranked {
            assert!(quote.eta > 0.0);
            assert!(quote.fare > 0);
            assert!(quote.distance >= 0.5);
        }
    }
}

#[test]
fn cheapest_is_non_decreasing_in_fare() {
    let ranked = stub_engine()
        .rank(&request_with(RankingPreference::Cheapest, 14))
        .expect("ranked");
    let fares = fares(&ranked);
    assert!(fares.windows(2).all(|w| w[0] <= w[1]), "{fares:?}");
    assert_eq!(ranked[0].vehicle, VehicleClass::Bike);
}

#[test]
fn fastest_is_non_decreasing_in_eta() {
    let ranked = stub_engine()
        .rank(&request_with(RankingPreference::Fastest, 14))
        .expect("ranked");
    let etas = etas(&ranked);
    assert!(etas.windows(2).all(|w| w[0] <= w[1]), "{etas:?}");
    assert_eq!(
        ranked.iter().map(|q| q.vehicle).collect::<Vec<_>>(),
        vec![VehicleClass::Bike, VehicleClass::Sedan, VehicleClass::Suv]
    );
}

#[test]
fn balanced_orders_by_weighted_score() {
    let engine = stub_engine();
    let ranked = engine.rank(&off_peak_request()).expect("ranked");
    let scores: Vec<f64> = ranked
        .iter()
        .map(|q| engine.pricing().balanced_score(q.eta, q.fare))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{scores:?}");
}

#[test]
fn demand_follows_rush_hours() {
    let engine = stub_engine();
    let rush = engine.quote_all(&rush_request()).expect("quotes");
    let calm = engine.quote_all(&off_peak_request()).expect("quotes");
    assert!(rush.iter().all(|q| q.demand == DemandLevel::High));
    assert!(calm.iter().all(|q| q.demand == DemandLevel::Normal));
}

#[test]
fn surge_fare_is_base_fare_times_multiplier() {
    let engine = stub_engine();
    let rush = engine.quote_all(&rush_request()).expect("quotes");
    let calm = engine.quote_all(&off_peak_request()).expect("quotes");
    for (r, c) in rush.iter().zip(&calm) {
        let expected = f64::from(c.fare) * 1.45;
        // Both sides are rounded to whole units independently.
        assert!((f64::from(r.fare) - expected).abs() <= 1.5, "{r:?} vs {c:?}");
    }
}

#[test]
fn doubling_the_offset_roughly_doubles_distance() {
    let engine = stub_engine();
    let near = engine.quote_all(&off_peak_request()).expect("quotes");
    let far = engine
        .quote_all(&TripRequest::new(TEST_PICKUP, TEST_DROP_DOUBLED, 14))
        .expect("quotes");
    let ratio = far[0].distance / near[0].distance;
    assert!((ratio - 2.0).abs() < 0.02, "ratio {ratio}");
}

#[test]
fn identical_points_are_priced_at_minimum_distance() {
    let quotes = stub_engine().quote_all(&same_point_request()).expect("quotes");
    assert!(quotes.iter().all(|q| q.distance == 0.5));
    let bike = quotes
        .iter()
        .find(|q| q.vehicle == VehicleClass::Bike)
        .expect("bike quote");
    // 20 + 5 * 0.5 = 22.5, rounded half away from zero.
    assert_eq!(bike.fare, 23);
}

#[test]
fn all_quotes_share_distance_and_demand() {
    let quotes = stub_engine().quote_all(&rush_request()).expect("quotes");
    assert_eq!(quotes.len(), VehicleClass::COUNT);
    assert!(quotes.iter().all(|q| q.distance == quotes[0].distance));
    assert!(quotes.iter().all(|q| q.demand == quotes[0].demand));
}

#[test]
fn hour_out_of_range_is_invalid() {
    let err = stub_engine()
        .rank(&request_with(RankingPreference::Balanced, 30))
        .unwrap_err();
    assert!(matches!(err, QuoteError::InvalidRequest(_)));
}
