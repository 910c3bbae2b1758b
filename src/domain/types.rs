//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - built once by the loader and shared read-only afterwards
//! - handed to a map layer as markers
//! - printed as JSON by the CLI

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Location the web front-end serves the merged census table from.
pub const DEFAULT_SOURCE: &str = "/data_files/us_city_populations_1790-2020.csv";

/// Directory that `/`-rooted sources resolve against when read from disk.
pub const DEFAULT_DATA_ROOT: &str = "public";

/// Zoom level at which marker radii are left unscaled.
pub const REFERENCE_ZOOM: f64 = 4.0;

/// A type-inferred table cell.
///
/// Numeric-looking strings arrive as `Number`, `true`/`false` as `Bool`, and
/// empty cells as `Empty`. Everything else stays `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    /// Whether the value counts as present for row validation.
    ///
    /// `Empty`, `false`, `0`, `NaN` and `""` are all falsy. Note that this
    /// rejects a latitude or longitude of exactly zero.
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Bool(b) => *b,
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// One validated row of the source table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRecord {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Population per census year; `None` where the cell was blank or not numeric.
    pub population_by_year: BTreeMap<u16, Option<f64>>,
}

impl CityRecord {
    pub fn population(&self, year: u16) -> Option<f64> {
        self.population_by_year.get(&year).copied().flatten()
    }
}

/// Inclusive range of census years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: u16,
    pub end: u16,
}

impl YearRange {
    /// Used when the source header carries no 4-digit year column.
    pub const FALLBACK: YearRange = YearRange { start: 1790, end: 2020 };

    pub fn contains(self, year: u16) -> bool {
        (self.start..=self.end).contains(&year)
    }

    pub fn clamp(self, year: u16) -> u16 {
        year.clamp(self.start, self.end)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Marker size and fill for one city at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualEncoding {
    pub radius: f64,
    pub color: &'static str,
}

/// Everything a map layer needs to draw one city for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub year: u16,
    pub population: f64,
    pub radius: f64,
    pub color: &'static str,
}

/// Aggregate over all cities reporting a population for one census year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: u16,
    pub cities: usize,
    pub population: f64,
}

/// Where to load the city table from.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Path or URL of the table; see `io::fetch::SourceFetcher` for resolution.
    pub source: String,
    pub data_root: PathBuf,
    pub base_url: Option<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            base_url: None,
        }
    }
}

/// Map view state the encoder is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub year: u16,
    pub zoom: f64,
    pub equal_radius: bool,
}
