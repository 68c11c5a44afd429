//! Tabular output for trip lists.

use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

use crate::domain::models::TripRequest;
use crate::services::CycleStats;

/// Build a borderless table of trip requests.
pub fn trip_table(trips: &[TripRequest]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["ID", "ORIGIN", "DESTINATION", "ROUTE", "REQUESTED"]
                .iter()
                .map(|h| Cell::new(h).set_alignment(CellAlignment::Left)),
        );

    for trip in trips {
        let route = if trip.is_enriched() {
            console::style("enriched").green().to_string()
        } else {
            console::style("missing").dim().to_string()
        };
        let requested = trip
            .requested_at
            .map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d %H:%M").to_string());

        table.add_row(vec![
            trip.id.as_str().to_string(),
            trip.origin_city.clone().unwrap_or_else(|| "-".to_string()),
            trip.destination_city
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            route,
            requested,
        ]);
    }

    table
}

/// One-line cycle summary for human output.
pub fn cycle_summary(stats: &CycleStats) -> String {
    format!(
        "{} scanned, {} dispatched, {} enriched",
        stats.scanned, stats.dispatched, stats.succeeded
    )
}
