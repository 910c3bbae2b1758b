//! Population → marker size/color ladders and marker identity.

use crate::domain::{CityRecord, REFERENCE_ZOOM, VisualEncoding};

/// Per-level growth of marker radius when zooming in.
pub const ZOOM_SCALE: f64 = 1.4;

/// Base radius used for every city in equal-radius mode.
pub const EQUAL_RADIUS_BASE: f64 = 1.0;

/// `(population >=, base radius)`, highest threshold first.
///
/// The 2,500..5,000 band is smaller than the fallback below it.
pub const RADIUS_TIERS: &[(f64, f64)] = &[
    (10_000_000.0, 11.0),
    (5_000_000.0, 9.0),
    (1_000_000.0, 7.5),
    (500_000.0, 6.0),
    (250_000.0, 4.5),
    (100_000.0, 3.5),
    (50_000.0, 2.5),
    (10_000.0, 2.0),
    (5_000.0, 1.0),
    (2_500.0, 0.7),
];

pub const RADIUS_FALLBACK: f64 = 1.0;

/// `(population >=, fill color)`, highest threshold first.
///
/// Adjacent tiers sharing a color are kept as separate entries.
pub const COLOR_TIERS: &[(f64, &str)] = &[
    (5_000_000.0, "#800026"),
    (1_000_000.0, "#800026"),
    (500_000.0, "#BD0026"),
    (100_000.0, "#E31A1C"),
    (50_000.0, "#E31A1C"),
    (10_000.0, "#FD8D3C"),
    (5_000.0, "#FEB24C"),
];

pub const COLOR_FALLBACK: &str = "#FED976";

/// Delimiter between the fields of an identity key.
pub const KEY_DELIMITER: &str = ",";

fn tier<T: Copy>(tiers: &[(f64, T)], population: f64, fallback: T) -> T {
    tiers
        .iter()
        .find(|(threshold, _)| population >= *threshold)
        .map(|(_, value)| *value)
        .unwrap_or(fallback)
}

/// Marker radius for `population` at map `zoom`.
///
/// Zoom level 4 leaves the tier's base radius unscaled; every level above or
/// below multiplies or divides it by [`ZOOM_SCALE`].
pub fn radius(population: f64, zoom: f64, equal_radius: bool) -> f64 {
    let base = if equal_radius {
        EQUAL_RADIUS_BASE
    } else {
        tier(RADIUS_TIERS, population, RADIUS_FALLBACK)
    };
    base * ZOOM_SCALE.powf(zoom - REFERENCE_ZOOM)
}

/// Fill color (hex) for `population`.
pub fn color(population: f64) -> &'static str {
    tier(COLOR_TIERS, population, COLOR_FALLBACK)
}

pub fn encode(population: f64, zoom: f64, equal_radius: bool) -> VisualEncoding {
    VisualEncoding {
        radius: radius(population, zoom, equal_radius),
        color: color(population),
    }
}

/// Stable key for a record: city, state, latitude, longitude.
pub fn identity_key(record: &CityRecord) -> String {
    [
        record.city.clone(),
        record.state.clone(),
        record.latitude.to_string(),
        record.longitude.to_string(),
    ]
    .join(KEY_DELIMITER)
}
