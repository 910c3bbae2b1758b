//! Shared "load then encode" workflow used by every subcommand.
//!
//! Load once -> validate the requested view -> build markers/histories.
//! The subcommand handlers in `app` only deal with presentation.

use crate::domain::{Dataset, LoadConfig, Marker, ViewConfig};
use crate::error::AppError;
use crate::io::ingest::Loader;
use crate::report::{CityHistory, city_history};

/// Load the dataset described by `config` on a single-threaded runtime.
pub fn load_dataset(config: &LoadConfig) -> Result<Dataset, AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(4, format!("Failed to start async runtime: {e}")))?;

    let loader = Loader::from_config(config);
    let dataset = runtime.block_on(loader.load(&config.source))?;
    Ok(dataset)
}

/// Markers for `view`, rejecting years outside the dataset's range.
pub fn markers_for_view(dataset: &Dataset, view: &ViewConfig) -> Result<Vec<Marker>, AppError> {
    let range = dataset.year_range();
    if !range.contains(view.year) {
        return Err(AppError::new(
            2,
            format!("Year {} is outside the data range {}..={}.", view.year, range.start, range.end),
        ));
    }
    if !dataset.census_years().is_empty() && !dataset.census_years().contains(&view.year) {
        log::warn!("{} is not a census year in this table; no city reports a population for it", view.year);
    }

    Ok(dataset.markers_at(view.year, view.zoom, view.equal_radius))
}

/// Histories of every city named `city` (optionally in `state`).
pub fn histories_for_city(
    dataset: &Dataset,
    city: &str,
    state: Option<&str>,
    zoom: f64,
    equal_radius: bool,
) -> Result<Vec<CityHistory>, AppError> {
    let matches = dataset.find_city(city, state);
    if matches.is_empty() {
        let which = match state {
            Some(state) => format!("{city}, {state}"),
            None => city.to_string(),
        };
        return Err(AppError::new(3, format!("No city named '{which}' in the dataset.")));
    }

    Ok(matches
        .into_iter()
        .map(|record| city_history(dataset, record, zoom, equal_radius))
        .collect())
}
