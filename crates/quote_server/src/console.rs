//! One-shot terminal quote: the same ranking as the HTTP API, printed as a table.

use std::fmt::Write;

use quote_core::{QuoteEngine, QuoteError, TripRequest, VehicleQuote};

/// Default pickup and drop longitudes for console quotes.
pub const DEFAULT_PICKUP_LON: f64 = 74.74;
pub const DEFAULT_DROP_LON: f64 = 74.77;

/// Fixed-width table with columns `vehicle, distance, fare, eta, demand`.
pub fn render_table(quotes: &[VehicleQuote]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>9} {:>6} {:>6} {:>7}",
        "vehicle", "distance", "fare", "eta", "demand"
    );
    for q in quotes {
        let _ = writeln!(
            out,
            "{:<8} {:>9.2} {:>6} {:>6.1} {:>7}",
            q.vehicle.name(),
            q.distance,
            q.fare,
            q.eta,
            q.demand.label()
        );
    }
    out
}

/// Rank `request` and format the report printed by the `console` subcommand.
pub fn console_report(engine: &QuoteEngine, request: &TripRequest) -> Result<String, QuoteError> {
    let quotes = engine.rank(request)?;
    let rule = "-".repeat(50);
    Ok(format!(
        "{rule}\nANALYSING {} OPTIONS...\n{rule}\n{}{rule}",
        request.preference.as_str().to_uppercase(),
        render_table(&quotes)
    ))
}
