//! Formatted terminal output.
//!
//! Formatting lives here so the loader and encoder stay free of presentation
//! concerns and output changes stay localized.

use crate::domain::{Dataset, LoadConfig, Marker};
use crate::report::CityHistory;

/// Dataset summary: source, row counts, year range, per-year totals.
pub fn format_summary(dataset: &Dataset, config: &LoadConfig) -> String {
    let mut out = String::new();

    out.push_str("=== citypop - U.S. city populations ===\n");
    out.push_str(&format!("Source: {}\n", config.source));
    out.push_str(&format!(
        "Rows: read={} | kept={} | dropped={}\n",
        dataset.rows_read(),
        dataset.len(),
        dataset.rows_dropped(),
    ));
    out.push_str(&format!("Years: {}..={}", dataset.start_year(), dataset.end_year()));
    if dataset.census_years().is_empty() {
        out.push_str(" (default; no census year columns found)");
    }
    out.push('\n');

    let totals = dataset.year_totals();
    if !totals.is_empty() {
        out.push_str("\nYear    Cities    Population\n");
        for t in totals {
            out.push_str(&format!(
                "{:<6}  {:>6}  {:>12}\n",
                t.year,
                t.cities,
                format_population(t.population)
            ));
        }
    }

    out
}

/// Marker table for one year.
pub fn format_markers(markers: &[Marker], year: u16, zoom: f64, equal_radius: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Markers for {year} (zoom {zoom}{}): {}\n",
        if equal_radius { ", equal radius" } else { "" },
        markers.len()
    ));
    if markers.is_empty() {
        return out;
    }

    out.push_str(&format!(
        "\n{:<28} {:<5} {:>9} {:>10} {:>12} {:>7}  {}\n",
        "City", "State", "Lat", "Lon", "Population", "Radius", "Color"
    ));
    for m in markers {
        out.push_str(&format!(
            "{:<28} {:<5} {:>9.4} {:>10.4} {:>12} {:>7.3}  {}\n",
            truncate(&m.city, 28),
            m.state,
            m.latitude,
            m.longitude,
            format_population(m.population),
            m.radius,
            m.color
        ));
    }

    out
}

/// Population history for each matched city.
pub fn format_city_histories(histories: &[CityHistory]) -> String {
    let mut out = String::new();

    for (idx, h) in histories.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}, {} ({:.4}, {:.4})\n", h.city, h.state, h.latitude, h.longitude));
        out.push_str(&format!("Key: {}\n", h.key));
        out.push_str(&format!("{:<6}  {:>12}  {:>7}  {}\n", "Year", "Population", "Radius", "Color"));
        for p in &h.points {
            match (p.population, p.radius, p.color) {
                (Some(pop), Some(radius), Some(color)) => out.push_str(&format!(
                    "{:<6}  {:>12}  {:>7.3}  {}\n",
                    p.year,
                    format_population(pop),
                    radius,
                    color
                )),
                _ => out.push_str(&format!("{:<6}  {:>12}  {:>7}  -\n", p.year, "-", "-")),
            }
        }
    }

    out
}

/// Whole-number population with thousands separators.
pub fn format_population(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 { format!("-{grouped}") } else { grouped }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_grouping() {
        assert_eq!(format_population(0.0), "0");
        assert_eq!(format_population(999.0), "999");
        assert_eq!(format_population(1_000.0), "1,000");
        assert_eq!(format_population(8_804_190.0), "8,804,190");
        assert_eq!(format_population(-12_345.4), "-12,345");
    }

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("Boston", 28), "Boston");
        assert_eq!(truncate("Abcdefghij", 5), "Abcd~");
    }

    #[test]
    fn empty_marker_table_has_header_only() {
        let out = format_markers(&[], 1790, 4.0, true);
        assert_eq!(out, "Markers for 1790 (zoom 4, equal radius): 0\n");
    }
}
