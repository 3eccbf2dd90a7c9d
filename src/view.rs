use tui::style::Color;

use crate::models::{Availability, Fuel, FuelFilter, Station, Stock};

/// Derives the subset both presentation surfaces render. Pure: the same
/// `(stations, filter)` pair always yields identical membership and
/// order, and insertion order is preserved.
pub fn filtered(stations: &[Station], filter: FuelFilter) -> Vec<Station> {
    stations
        .iter()
        .filter(|s| match filter {
            FuelFilter::All => true,
            FuelFilter::Only(fuel) => s.fuel.contains(&fuel),
        })
        .cloned()
        .collect()
}

/// Strict some/every classification over the three recognized fuel types.
pub fn stock(avail: &Availability) -> Stock {
    let values = Fuel::ALL.map(|f| avail.get(f));

    if values.iter().all(|v| *v) {
        Stock::Full
    } else if values.iter().any(|v| *v) {
        Stock::Partial
    } else {
        Stock::Empty
    }
}

/// Marker color tier consumed by the map surface.
pub fn marker_color(stock: Stock) -> Color {
    match stock {
        Stock::Full => Color::Green,
        Stock::Partial => Color::Yellow,
        Stock::Empty => Color::Red,
    }
}

/// Table status column: available as soon as any fuel is in stock.
pub fn status_label(avail: &Availability) -> &'static str {
    match stock(avail) {
        Stock::Empty => "Rupture",
        _ => "Disponible",
    }
}

/// Human-readable list of in-stock fuels, e.g. `Essence, Gazole`.
pub fn summary(avail: &Availability) -> String {
    let parts: Vec<&str> = Fuel::ALL
        .iter()
        .filter(|f| avail.get(**f))
        .map(|f| f.label())
        .collect();

    if parts.is_empty() {
        "Rupture".to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::models::{Availability, Fuel, FuelFilter, Station, Stock};

    use super::{filtered, status_label, stock, summary};

    fn station(id: i64, fuel: Vec<Fuel>) -> Station {
        Station {
            id,
            name: format!("station_{}", id),
            city: "Mopti".to_string(),
            lat: 14.4,
            lon: -4.1,
            fuel,
            available: Availability::default(),
            updated: Utc::now(),
        }
    }

    #[test]
    fn all_filter_preserves_membership_and_order() {
        let stations = vec![
            station(3, vec![Fuel::Gazole]),
            station(1, vec![Fuel::Essence]),
            station(2, vec![]),
        ];

        assert_eq!(filtered(&stations, FuelFilter::All), stations);
    }

    #[test]
    fn fuel_filter_keeps_configured_stations_in_order() {
        let stations = vec![
            station(1, vec![Fuel::Essence, Fuel::Gazole]),
            station(2, vec![Fuel::Essence]),
            station(3, vec![Fuel::Gazole]),
        ];

        let subset = filtered(&stations, FuelFilter::Only(Fuel::Gazole));

        assert_eq!(subset.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn filter_membership_ignores_availability() {
        let mut station = station(1, vec![Fuel::Gpl]);
        station.available = Availability::default(); // all out of stock

        let subset = filtered(&[station], FuelFilter::Only(Fuel::Gpl));

        assert_eq!(subset.len(), 1);
    }

    #[test]
    fn filtering_is_pure() {
        let stations = vec![
            station(1, vec![Fuel::Essence]),
            station(2, vec![Fuel::Gazole]),
        ];

        let first = filtered(&stations, FuelFilter::Only(Fuel::Essence));
        let second = filtered(&stations, FuelFilter::Only(Fuel::Essence));

        assert_eq!(first, second);
    }

    #[test]
    fn stock_tiers_use_strict_some_every() {
        let full = Availability {
            essence: true,
            gazole: true,
            gpl: true,
        };
        let partial = Availability {
            essence: true,
            gazole: false,
            gpl: false,
        };

        assert_eq!(stock(&full), Stock::Full);
        assert_eq!(stock(&partial), Stock::Partial);
        assert_eq!(stock(&Availability::default()), Stock::Empty);
    }

    #[test]
    fn labels_match_the_table_vocabulary() {
        let partial = Availability {
            essence: true,
            gazole: true,
            gpl: false,
        };

        assert_eq!(status_label(&partial), "Disponible");
        assert_eq!(status_label(&Availability::default()), "Rupture");
        assert_eq!(summary(&partial), "Essence, Gazole");
        assert_eq!(summary(&Availability::default()), "Rupture");
    }
}
