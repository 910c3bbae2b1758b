//! Reporting utilities: marker rankings and per-city histories.

use serde::Serialize;

use crate::domain::{CityRecord, Dataset, Marker};
use crate::encode;
use crate::error::AppError;

pub mod format;

pub use format::*;

/// Encoded population of one city for one census year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub year: u16,
    pub population: Option<f64>,
    /// `None` when the city reports no population that year.
    pub radius: Option<f64>,
    pub color: Option<&'static str>,
}

/// A city's encoding across every census year of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityHistory {
    pub key: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub points: Vec<HistoryPoint>,
}

/// Largest `top_n` markers by population, ties kept in record order.
pub fn rank_markers(markers: &[Marker], top_n: usize) -> Vec<Marker> {
    let mut sorted = markers.to_vec();
    sorted.sort_by(|a, b| b.population.partial_cmp(&a.population).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(top_n);
    sorted
}

pub fn city_history(dataset: &Dataset, record: &CityRecord, zoom: f64, equal_radius: bool) -> CityHistory {
    let points = dataset
        .census_years()
        .iter()
        .map(|&year| {
            let population = dataset.population_at(record, year);
            let enc = population.map(|p| encode::encode(p, zoom, equal_radius));
            HistoryPoint {
                year,
                population,
                radius: enc.map(|e| e.radius),
                color: enc.map(|e| e.color),
            }
        })
        .collect();

    CityHistory {
        key: encode::identity_key(record),
        city: record.city.clone(),
        state: record.state.clone(),
        latitude: record.latitude,
        longitude: record.longitude,
        points,
    }
}

/// Pretty JSON for stdout.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::new(4, format!("Failed to encode JSON: {e}")))
}
