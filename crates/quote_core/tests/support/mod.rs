#![allow(dead_code)]

use quote_core::test_helpers::{TEST_DROP, TEST_PICKUP};
use quote_core::{Coordinate, RankingPreference, TripRequest, VehicleQuote};

/// Off-peak request between the shared test coordinates.
pub fn off_peak_request() -> TripRequest {
    TripRequest::new(TEST_PICKUP, TEST_DROP, 14)
}

/// Same trip during the evening rush.
pub fn rush_request() -> TripRequest {
    TripRequest::new(TEST_PICKUP, TEST_DROP, 18)
}

pub fn request_with(preference: RankingPreference, hour: u8) -> TripRequest {
    TripRequest::new(TEST_PICKUP, TEST_DROP, hour).with_preference(preference)
}

pub fn same_point_request() -> TripRequest {
    let here = Coordinate::new(13.3409, 74.7421);
    TripRequest::new(here, here, 14)
}

pub fn fares(quotes: &[VehicleQuote]) -> Vec<u32> {
    quotes.iter().map(|q| q.fare).collect()
}

pub fn etas(quotes: &[VehicleQuote]) -> Vec<f64> {
    quotes.iter().map(|q| q.eta).collect()
}
