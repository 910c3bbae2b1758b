//! The loaded city corpus and the read-only queries a map layer runs on it.

use crate::domain::{CityRecord, Marker, YearRange, YearTotal};
use crate::encode;

/// All validated records of one load, plus the detected census years.
///
/// Built once by the loader; there are no mutating accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<CityRecord>,
    year_range: YearRange,
    census_years: Vec<u16>,
    rows_read: usize,
}

impl Dataset {
    /// `census_years` must be sorted and de-duplicated; an empty list selects
    /// [`YearRange::FALLBACK`].
    pub(crate) fn new(records: Vec<CityRecord>, census_years: Vec<u16>, rows_read: usize) -> Self {
        let year_range = match (census_years.first(), census_years.last()) {
            (Some(&start), Some(&end)) => YearRange { start, end },
            _ => YearRange::FALLBACK,
        };
        Self {
            records,
            year_range,
            census_years,
            rows_read,
        }
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    pub fn start_year(&self) -> u16 {
        self.year_range.start
    }

    pub fn end_year(&self) -> u16 {
        self.year_range.end
    }

    /// Year columns found in the source header, ascending.
    pub fn census_years(&self) -> &[u16] {
        &self.census_years
    }

    /// Data rows produced by the parser, before validation.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_read.saturating_sub(self.records.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn population_at(&self, record: &CityRecord, year: u16) -> Option<f64> {
        record.population(year)
    }

    /// Markers for every city with a non-zero population at `year`, in record order.
    pub fn markers_at(&self, year: u16, zoom: f64, equal_radius: bool) -> Vec<Marker> {
        self.records
            .iter()
            .filter_map(|record| {
                let population = self.population_at(record, year).filter(|p| *p != 0.0)?;
                let enc = encode::encode(population, zoom, equal_radius);
                Some(Marker {
                    key: encode::identity_key(record),
                    city: record.city.clone(),
                    state: record.state.clone(),
                    latitude: record.latitude,
                    longitude: record.longitude,
                    year,
                    population,
                    radius: enc.radius,
                    color: enc.color,
                })
            })
            .collect()
    }

    /// Records whose city matches `city` (case-insensitive), optionally narrowed by state.
    pub fn find_city(&self, city: &str, state: Option<&str>) -> Vec<&CityRecord> {
        let city = city.trim();
        let state = state.map(str::trim);
        self.records
            .iter()
            .filter(|r| r.city.eq_ignore_ascii_case(city))
            .filter(|r| state.is_none_or(|s| r.state.eq_ignore_ascii_case(s)))
            .collect()
    }

    /// Number of reporting cities and summed population per census year.
    pub fn year_totals(&self) -> Vec<YearTotal> {
        self.census_years
            .iter()
            .map(|&year| {
                let (cities, population) = self
                    .records
                    .iter()
                    .filter_map(|r| r.population(year))
                    .fold((0usize, 0.0), |(n, sum), p| (n + 1, sum + p));
                YearTotal {
                    year,
                    cities,
                    population,
                }
            })
            .collect()
    }
}
