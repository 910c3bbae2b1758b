//! Command-line parsing for the city population explorer.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading and encoding.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{DEFAULT_DATA_ROOT, DEFAULT_SOURCE, LoadConfig, REFERENCE_ZOOM};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "citypop", version, about = "U.S. city populations 1790-2020, encoded for map display")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging entirely; overrides `--verbose`.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print row counts, the census year range, and per-year totals (default).
    Summary,
    /// Print the map markers (radius + color) for one census year.
    Markers(MarkersArgs),
    /// Print the population history of a city.
    City(CityArgs),
}

/// Where the city table comes from.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Path or URL of the city table.
    #[arg(long, env = "CITYPOP_SOURCE", default_value = DEFAULT_SOURCE, global = true)]
    pub source: String,

    /// Directory that `/`-rooted sources are read from.
    #[arg(long, env = "CITYPOP_DATA_ROOT", default_value = DEFAULT_DATA_ROOT, global = true)]
    pub data_root: PathBuf,

    /// Fetch relative sources over HTTP from this base URL instead of disk.
    #[arg(long, env = "CITYPOP_BASE_URL", global = true)]
    pub base_url: Option<String>,
}

impl SourceArgs {
    pub fn to_config(&self) -> LoadConfig {
        LoadConfig {
            source: self.source.clone(),
            data_root: self.data_root.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Map view options shared by the encoding commands.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Map zoom level; 4 leaves marker radii unscaled.
    #[arg(long, default_value_t = REFERENCE_ZOOM)]
    pub zoom: f64,

    /// Size every marker the same regardless of population.
    #[arg(long)]
    pub equal_radius: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct MarkersArgs {
    /// Census year to encode.
    #[arg(short, long)]
    pub year: u16,

    /// Only show the N most populous cities.
    #[arg(long)]
    pub top: Option<usize>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CityArgs {
    /// City name (case-insensitive).
    pub name: String,

    /// Two-letter state code to disambiguate.
    #[arg(long)]
    pub state: Option<String>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_markers_command() {
        let cli = Cli::try_parse_from(["citypop", "markers", "--year", "1900", "--zoom", "6", "--equal-radius", "--top", "5"])
            .unwrap();
        let Some(Command::Markers(args)) = cli.command else {
            panic!("expected markers command");
        };
        assert_eq!(args.year, 1900);
        assert_eq!(args.view.zoom, 6.0);
        assert!(args.view.equal_radius);
        assert_eq!(args.top, Some(5));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["citypop", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }
}
