//! The HTML console page served at `/` and `/test`.

use std::fmt::Write;

use quote_core::{DemandLevel, VehicleQuote};

const RESULTS_PLACEHOLDER: &str = "{% RESULTS_SECTION %}";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Udupi AI | Admin Console</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;600;700&display=swap" rel="stylesheet">
    <style>
        body { font-family: 'Inter', sans-serif; background-color: #0f172a; color: #f8fafc; }
        .glass { background: rgba(30, 41, 59, 0.7); backdrop-filter: blur(12px); border: 1px solid rgba(255,255,255,0.1); }
        input, select { background: #1e293b !important; border: 1px solid #334155 !important; color: white !important; }
        input:focus { border-color: #3b82f6 !important; }
    </style>
</head>
<body class="min-h-screen flex items-center justify-center p-4">
    <div class="container max-w-4xl glass rounded-3xl overflow-hidden shadow-2xl flex flex-col md:flex-row">
        <div class="md:w-1/3 bg-blue-600 p-8 flex flex-col justify-between text-white">
            <div>
                <h1 class="text-3xl font-bold mb-2">Smart Ride AI</h1>
                <p class="text-blue-100 text-sm">Udupi-Manipal Regional Engine</p>
            </div>
            <div class="space-y-4 text-xs opacity-80">
                <p>&#9679; Random Forest ETA Model</p>
                <p>&#9679; 1.45x Surge Pricing Logic</p>
                <p>&#9679; Multi-Vehicle Ranking</p>
            </div>
        </div>
        <div class="md:w-2/3 p-8 bg-slate-900/50">
            <h2 class="text-xl font-semibold mb-6 flex items-center gap-2">
                <span class="w-2 h-6 bg-blue-500 rounded-full"></span>
                Inference Manual Console
            </h2>
            <form method="post" action="/test" class="space-y-6">
                <div class="grid grid-cols-2 gap-4">
                    <div class="flex flex-col gap-1">
                        <label class="text-xs font-medium text-slate-400">Pickup Latitude</label>
                        <input type="number" step="0.0001" name="start_lat" value="13.3516" class="p-3 rounded-xl outline-none">
                    </div>
                    <div class="flex flex-col gap-1">
                        <label class="text-xs font-medium text-slate-400">Pickup Longitude</label>
                        <input type="number" step="0.0001" name="start_lon" value="74.7421" class="p-3 rounded-xl outline-none">
                    </div>
                    <div class="flex flex-col gap-1">
                        <label class="text-xs font-medium text-slate-400">Drop Latitude</label>
                        <input type="number" step="0.0001" name="end_lat" value="13.3441" class="p-3 rounded-xl outline-none">
                    </div>
                    <div class="flex flex-col gap-1">
                        <label class="text-xs font-medium text-slate-400">Drop Longitude</label>
                        <input type="number" step="0.0001" name="end_lon" value="74.7860" class="p-3 rounded-xl outline-none">
                    </div>
                    <div class="flex flex-col gap-1">
                        <label class="text-xs font-medium text-slate-400">Operating Hour (6-23)</label>
                        <input type="number" name="hour" value="10" min="6" max="23" class="p-3 rounded-xl outline-none">
                    </div>
                    <div class="flex flex-col gap-1">
                        <label class="text-xs font-medium text-slate-400">Ranking Strategy</label>
                        <select name="preference" class="p-3 rounded-xl outline-none">
                            <option value="balanced">Balanced</option>
                            <option value="cheapest">Cheapest</option>
                            <option value="fastest">Fastest</option>
                        </select>
                    </div>
                </div>
                <button type="submit" class="w-full bg-blue-500 hover:bg-blue-600 text-white font-bold py-4 rounded-2xl transition-all shadow-lg">
                    Run AI Analysis
                </button>
            </form>
            {% RESULTS_SECTION %}
        </div>
    </div>
</body>
</html>
"#;

/// The console page with an empty results section.
pub fn render_home() -> String {
    PAGE_TEMPLATE.replace(RESULTS_PLACEHOLDER, "")
}

/// The console page with ranked quotes listed below the form.
pub fn render_results(distance_km: f64, surge_multiplier: f64, quotes: &[VehicleQuote]) -> String {
    let mut section = String::new();
    let _ = write!(
        section,
        r#"<div class="mt-8 pt-8 border-t border-slate-800">
            <div class="flex justify-between items-center mb-4">
                <span class="text-slate-400 text-sm font-medium">Trip Distance</span>
                <span class="text-blue-400 font-bold">{distance_km:.2} km</span>
            </div>
            <div class="space-y-3">"#
    );
    for quote in quotes {
        let badge = if quote.demand == DemandLevel::High {
            format!(
                r#"<span class="text-[10px] bg-red-500/20 text-red-400 px-2 py-0.5 rounded-md border border-red-500/30">SURGE {surge_multiplier:.2}x</span>"#
            )
        } else {
            String::new()
        };
        let _ = write!(
            section,
            r#"
                <div class="flex justify-between items-center p-4 bg-slate-800/40 border border-slate-700/50 rounded-2xl">
                    <div>
                        <div class="font-bold flex items-center gap-2">{vehicle} {badge}</div>
                        <div class="text-xs text-slate-500">Predicted ETA: {eta:.1} mins</div>
                    </div>
                    <div class="text-xl font-black text-emerald-400">&#8377;{fare}</div>
                </div>"#,
            vehicle = quote.vehicle,
            eta = quote.eta,
            fare = quote.fare,
        );
    }
    section.push_str("</div></div>");
    PAGE_TEMPLATE.replace(RESULTS_PLACEHOLDER, &section)
}

/// The console page with an error block in place of results.
pub fn render_error(message: &str) -> String {
    let section = format!(
        r#"<div class="mt-8 p-4 rounded-2xl border border-red-500/30 bg-red-500/10 text-red-300 text-sm">{}</div>"#,
        escape_html(message)
    );
    PAGE_TEMPLATE.replace(RESULTS_PLACEHOLDER, &section)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::VehicleClass;

    fn quote(vehicle: VehicleClass, demand: DemandLevel) -> VehicleQuote {
        VehicleQuote {
            vehicle,
            eta: 6.0,
            fare: 74,
            distance: 2.0,
            demand,
        }
    }

    #[test]
    fn home_has_no_placeholder() {
        let page = render_home();
        assert!(!page.contains(RESULTS_PLACEHOLDER));
        assert!(page.contains(r#"action="/test""#));
    }

    #[test]
    fn surge_badge_only_for_high_demand() {
        let page = render_results(2.0, 1.45, &[quote(VehicleClass::Mini, DemandLevel::High)]);
        assert!(page.contains("SURGE 1.45x"));
        assert!(page.contains("2.00 km"));
        assert!(page.contains("Predicted ETA: 6.0 mins"));

        let calm = render_results(2.0, 1.0, &[quote(VehicleClass::Mini, DemandLevel::Normal)]);
        assert!(!calm.contains("SURGE"));
    }

    #[test]
    fn errors_are_escaped() {
        let page = render_error("<script>");
        assert!(page.contains("&lt;script&gt;"));
    }
}
