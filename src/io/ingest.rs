//! City table ingest and validation.
//!
//! This module turns the wide-format census table (one row per city, one
//! column per census year) into a [`Dataset`]:
//!
//! - **Best-effort rows**: a row missing its city, state, or coordinates is
//!   dropped and counted, never fatal
//! - **Year range from the header**: every column named with exactly four
//!   digits is a census year
//! - **Injected collaborators**: fetching and parsing sit behind traits so
//!   the loader runs without real I/O in tests

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Cell, CityRecord, DEFAULT_SOURCE, Dataset, LoadConfig};
use crate::error::LoadError;
use crate::io::fetch::{SourceFetcher, TextFetch};
use crate::io::table::{CsvTableParser, Row, TableParser};

pub const COL_CITY: &str = "City";
pub const COL_STATE: &str = "State";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";

static YEAR_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"));

/// Loads a [`Dataset`] through a fetch and a parse capability.
#[derive(Debug, Clone)]
pub struct Loader<F, P> {
    fetcher: F,
    parser: P,
}

impl Loader<SourceFetcher, CsvTableParser> {
    /// Loader reading through [`SourceFetcher`] with the CSV parser.
    pub fn from_config(config: &LoadConfig) -> Self {
        Self::new(SourceFetcher::from_config(config), CsvTableParser::new())
    }
}

impl<F: TextFetch, P: TableParser> Loader<F, P> {
    pub fn new(fetcher: F, parser: P) -> Self {
        Self { fetcher, parser }
    }

    /// Fetch, parse, and validate the table at `source`.
    ///
    /// Fails with `SourceUnavailable` when the fetch fails and with `Parse`
    /// when the text has no header row. Invalid rows are dropped.
    pub async fn load(&self, source: &str) -> Result<Dataset, LoadError> {
        let text = self.fetcher.fetch(source).await?;
        let table = self.parser.parse(&text)?;

        let census_years = census_years(table.headers());
        if census_years.is_empty() {
            log::warn!("No census year columns in '{source}'; assuming the default year range");
        }

        let mut records = Vec::with_capacity(table.len());
        for (idx, row) in table.rows().enumerate() {
            match parse_row(&row, &census_years) {
                Some(record) => records.push(record),
                None => log::debug!("Dropping row {} of '{source}': missing city, state, or coordinates", idx + 2),
            }
        }

        let dataset = Dataset::new(records, census_years, table.len());
        log::info!(
            "Loaded {} of {} rows from '{source}' (years {}..={})",
            dataset.len(),
            dataset.rows_read(),
            dataset.start_year(),
            dataset.end_year()
        );
        Ok(dataset)
    }

    /// Load from [`DEFAULT_SOURCE`].
    pub async fn load_default(&self) -> Result<Dataset, LoadError> {
        self.load(DEFAULT_SOURCE).await
    }
}

/// Census years among `headers`, ascending and de-duplicated.
pub fn census_years(headers: &[String]) -> Vec<u16> {
    let mut years: Vec<u16> = headers
        .iter()
        .filter(|h| YEAR_COLUMN.is_match(h))
        .filter_map(|h| h.parse().ok())
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

fn parse_row(row: &Row<'_>, census_years: &[u16]) -> Option<CityRecord> {
    let city = row.get(COL_CITY);
    let state = row.get(COL_STATE);
    let latitude = row.get(COL_LATITUDE);
    let longitude = row.get(COL_LONGITUDE);

    // Zero is falsy, so a city on the equator or prime meridian is dropped.
    if ![city, state, latitude, longitude].iter().all(|c| c.is_truthy()) {
        return None;
    }

    let latitude = finite(latitude)?;
    let longitude = finite(longitude)?;

    let population_by_year = census_years
        .iter()
        .map(|&year| (year, row.get(&year.to_string()).as_number()))
        .collect::<BTreeMap<_, _>>();

    Some(CityRecord {
        city: city.to_string(),
        state: state.to_string(),
        latitude,
        longitude,
        population_by_year,
    })
}

fn finite(cell: &Cell) -> Option<f64> {
    cell.as_number().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::YearRange;

    /// In-memory fetch collaborator keyed by location.
    struct FakeFetch(HashMap<&'static str, &'static str>);

    impl FakeFetch {
        fn single(text: &'static str) -> Self {
            Self(HashMap::from([(DEFAULT_SOURCE, text)]))
        }
    }

    impl TextFetch for FakeFetch {
        async fn fetch(&self, location: &str) -> Result<String, LoadError> {
            self.0
                .get(location)
                .map(|t| t.to_string())
                .ok_or_else(|| LoadError::unavailable(location, "not found"))
        }
    }

    async fn load(text: &'static str) -> Result<Dataset, LoadError> {
        Loader::new(FakeFetch::single(text), CsvTableParser::new())
            .load_default()
            .await
    }

    #[tokio::test]
    async fn detects_year_range_from_header() {
        let ds = load("City,State,Latitude,Longitude,1800,1850,2020\nBaltimore,MD,39.29,-76.61,26514,169054,585708\n")
            .await
            .unwrap();
        assert_eq!(ds.start_year(), 1800);
        assert_eq!(ds.end_year(), 2020);
        assert_eq!(ds.census_years(), &[1800, 1850, 2020]);
        assert_eq!(ds.len(), 1);

        let r = &ds.records()[0];
        assert_eq!(r.city, "Baltimore");
        assert_eq!(r.state, "MD");
        assert_eq!(r.latitude, 39.29);
        assert_eq!(r.population(1850), Some(169_054.0));
    }

    #[tokio::test]
    async fn zero_latitude_is_dropped() {
        let ds = load("City,State,Latitude,Longitude,1900\nQuito,EC,0,-78.5,50000\nTampa,FL,27.95,-82.46,15839\n")
            .await
            .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].city, "Tampa");
        assert_eq!(ds.rows_read(), 2);
        assert_eq!(ds.rows_dropped(), 1);
    }

    #[tokio::test]
    async fn missing_identity_fields_are_dropped() {
        let text = "City,State,Latitude,Longitude,1900\n\
                    ,TX,29.76,-95.37,44633\n\
                    Houston,,29.76,-95.37,44633\n\
                    Houston,TX,,-95.37,44633\n\
                    Houston,TX,29.76,,44633\n\
                    Houston,TX,north,-95.37,44633\n\
                    Houston,TX,29.76,-95.37,44633\n";
        let ds = load(text).await.unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows_read(), 6);
    }

    #[tokio::test]
    async fn no_year_columns_uses_fallback_range() {
        let ds = load("City,State,Latitude,Longitude,Y1900,19000\nDenver,CO,39.74,-104.99,1,2\n")
            .await
            .unwrap();
        assert_eq!(ds.year_range(), YearRange::FALLBACK);
        assert_eq!(ds.start_year(), 1790);
        assert_eq!(ds.end_year(), 2020);
        assert!(ds.census_years().is_empty());
        assert_eq!(ds.len(), 1);
    }

    #[tokio::test]
    async fn blank_population_cells_are_absent() {
        let ds = load("City,State,Latitude,Longitude,1790,1800\nCleveland,OH,41.5,-81.69,,1000\n")
            .await
            .unwrap();
        let r = &ds.records()[0];
        assert_eq!(r.population_by_year.get(&1790), Some(&None));
        assert_eq!(r.population(1800), Some(1000.0));
    }

    #[tokio::test]
    async fn header_only_table_loads_empty() {
        let ds = load("City,State,Latitude,Longitude,1790,1800\n").await.unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.start_year(), 1790);
        assert_eq!(ds.end_year(), 1800);
    }

    #[tokio::test]
    async fn empty_text_is_a_parse_error() {
        let err = load("").await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[tokio::test]
    async fn fetch_failure_is_source_unavailable() {
        let loader = Loader::new(FakeFetch::single("City\n"), CsvTableParser::new());
        let err = loader.load("/elsewhere.csv").await.unwrap_err();
        assert_eq!(err, LoadError::unavailable("/elsewhere.csv", "not found"));
    }

    #[tokio::test]
    async fn keeps_source_row_order() {
        let ds = load("City,State,Latitude,Longitude\nB,XX,1,1\nA,XX,2,2\nC,XX,3,3\n")
            .await
            .unwrap();
        let cities: Vec<_> = ds.records().iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn padded_year_headers_are_not_census_years() {
        let ds = load("City,State,Latitude,Longitude, 1800,1850 \nAlbany,NY,42.65,-73.75,5349,50763\n")
            .await
            .unwrap();
        assert!(ds.census_years().is_empty());
        assert_eq!(ds.year_range(), YearRange::FALLBACK);
        assert!(ds.records()[0].population_by_year.is_empty());

        let ds = load("City,State,Latitude,Longitude, 1800,1850\nAlbany,NY,42.65,-73.75,5349,50763\n")
            .await
            .unwrap();
        assert_eq!(ds.census_years(), &[1850]);
        assert_eq!(ds.start_year(), 1850);
        assert_eq!(ds.end_year(), 1850);
    }

    #[test]
    fn year_columns_match_exactly_four_digits() {
        let headers: Vec<String> = ["City", "2020", "1790", "179", "17900", " 1800", "1800a", "1850", "\u{0661}\u{0668}\u{0660}\u{0660}"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(census_years(&headers), vec![1790, 1850, 2020]);
    }
}
