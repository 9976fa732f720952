//! Ranking policies for vehicle quotes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::VehicleQuote;
use crate::pricing::PricingConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingPreference {
    /// Ascending fare.
    Cheapest,
    /// Ascending ETA.
    Fastest,
    /// Ascending weighted sum of ETA and fare.
    #[default]
    Balanced,
}

impl RankingPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            RankingPreference::Cheapest => "cheapest",
            RankingPreference::Fastest => "fastest",
            RankingPreference::Balanced => "balanced",
        }
    }

    /// Lenient parse used by the HTTP and console front ends: accepts the
    /// menu numbers and short forms, and falls back to balanced for anything
    /// unrecognized.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Sort key for one quote; lower ranks first.
    pub fn sort_key(self, quote: &VehicleQuote, pricing: &PricingConfig) -> f64 {
        match self {
            RankingPreference::Cheapest => f64::from(quote.fare),
            RankingPreference::Fastest => quote.eta,
            RankingPreference::Balanced => pricing.balanced_score(quote.eta, quote.fare),
        }
    }
}

impl fmt::Display for RankingPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreference(pub String);

impl fmt::Display for UnknownPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ranking preference `{}`", self.0)
    }
}

impl std::error::Error for UnknownPreference {}

impl FromStr for RankingPreference {
    type Err = UnknownPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheapest" | "cheap" | "1" => Ok(RankingPreference::Cheapest),
            "balanced" | "2" => Ok(RankingPreference::Balanced),
            "fastest" | "fast" | "3" => Ok(RankingPreference::Fastest),
            _ => Err(UnknownPreference(s.to_string())),
        }
    }
}

/// Stable sort by the preference's key, then keep the first `top_k`.
pub fn rank_quotes(
    mut quotes: Vec<VehicleQuote>,
    preference: RankingPreference,
    pricing: &PricingConfig,
) -> Vec<VehicleQuote> {
    quotes.sort_by(|a, b| {
        preference
            .sort_key(a, pricing)
            .total_cmp(&preference.sort_key(b, pricing))
    });
    quotes.truncate(pricing.top_k);
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::DemandLevel;
    use crate::vehicle::VehicleClass;

    fn quote(vehicle: VehicleClass, eta: f64, fare: u32) -> VehicleQuote {
        VehicleQuote {
            vehicle,
            eta,
            fare,
            distance: 2.0,
            demand: DemandLevel::Normal,
        }
    }

    fn sample() -> Vec<VehicleQuote> {
        vec![
            quote(VehicleClass::Bike, 9.0, 30),
            quote(VehicleClass::Auto, 12.0, 46),
            quote(VehicleClass::Mini, 10.0, 74),
            quote(VehicleClass::Sedan, 6.0, 100),
            quote(VehicleClass::Suv, 7.0, 140),
        ]
    }

    fn vehicles(quotes: &[VehicleQuote]) -> Vec<VehicleClass> {
        quotes.iter().map(|q| q.vehicle).collect()
    }

    #[test]
    fn cheapest_orders_by_fare() {
        let ranked = rank_quotes(sample(), RankingPreference::Cheapest, &PricingConfig::default());
        assert_eq!(
            vehicles(&ranked),
            vec![VehicleClass::Bike, VehicleClass::Auto, VehicleClass::Mini]
        );
    }

    #[test]
    fn fastest_orders_by_eta() {
        let ranked = rank_quotes(sample(), RankingPreference::Fastest, &PricingConfig::default());
        assert_eq!(
            vehicles(&ranked),
            vec![VehicleClass::Sedan, VehicleClass::Suv, VehicleClass::Bike]
        );
    }

    #[test]
    fn balanced_orders_by_weighted_score() {
        // Scores: Bike 6.6, Auto 9.04, Mini 8.96, Sedan 7.6, Suv 9.8
        let ranked = rank_quotes(sample(), RankingPreference::Balanced, &PricingConfig::default());
        assert_eq!(
            vehicles(&ranked),
            vec![VehicleClass::Bike, VehicleClass::Sedan, VehicleClass::Mini]
        );
    }

    #[test]
    fn ties_keep_class_order() {
        let quotes = vec![
            quote(VehicleClass::Bike, 5.0, 50),
            quote(VehicleClass::Auto, 5.0, 50),
            quote(VehicleClass::Mini, 5.0, 50),
            quote(VehicleClass::Sedan, 5.0, 50),
        ];
        let ranked = rank_quotes(quotes, RankingPreference::Fastest, &PricingConfig::default());
        assert_eq!(
            vehicles(&ranked),
            vec![VehicleClass::Bike, VehicleClass::Auto, VehicleClass::Mini]
        );
    }

    #[test]
    fn parses_menu_numbers_and_aliases() {
        assert_eq!("1".parse::<RankingPreference>(), Ok(RankingPreference::Cheapest));
        assert_eq!("Cheap".parse::<RankingPreference>(), Ok(RankingPreference::Cheapest));
        assert_eq!("2".parse::<RankingPreference>(), Ok(RankingPreference::Balanced));
        assert_eq!(" fastest ".parse::<RankingPreference>(), Ok(RankingPreference::Fastest));
        assert_eq!("fast".parse::<RankingPreference>(), Ok(RankingPreference::Fastest));
        assert!("luxury".parse::<RankingPreference>().is_err());
        assert_eq!(RankingPreference::parse_lenient("luxury"), RankingPreference::Balanced);
    }
}
