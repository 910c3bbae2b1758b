//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the terminal logger
//! - loads the city table once
//! - prints summaries, markers, or city histories

use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use crate::cli::{CityArgs, Cli, Command, MarkersArgs};
use crate::domain::{LoadConfig, ViewConfig};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable overriding the `-v`/`--quiet` log level.
pub const LOG_ENV: &str = "CITYPOP_LOG";

/// Entry point for the `citypop` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(log_level(&cli));

    let config = cli.source.to_config();
    match cli.command.unwrap_or(Command::Summary) {
        Command::Summary => handle_summary(&config),
        Command::Markers(args) => handle_markers(&config, args),
        Command::City(args) => handle_city(&config, args),
    }
}

fn handle_summary(config: &LoadConfig) -> Result<(), AppError> {
    let dataset = pipeline::load_dataset(config)?;
    print!("{}", crate::report::format_summary(&dataset, config));
    Ok(())
}

fn handle_markers(config: &LoadConfig, args: MarkersArgs) -> Result<(), AppError> {
    let dataset = pipeline::load_dataset(config)?;
    let view = ViewConfig {
        year: args.year,
        zoom: args.view.zoom,
        equal_radius: args.view.equal_radius,
    };

    let mut markers = pipeline::markers_for_view(&dataset, &view)?;
    if let Some(top) = args.top {
        markers = crate::report::rank_markers(&markers, top);
    }

    if args.view.json {
        println!("{}", crate::report::to_json(&markers)?);
    } else {
        print!(
            "{}",
            crate::report::format_markers(&markers, view.year, view.zoom, view.equal_radius)
        );
    }
    Ok(())
}

fn handle_city(config: &LoadConfig, args: CityArgs) -> Result<(), AppError> {
    let dataset = pipeline::load_dataset(config)?;
    let histories = pipeline::histories_for_city(
        &dataset,
        &args.name,
        args.state.as_deref(),
        args.view.zoom,
        args.view.equal_radius,
    )?;

    if args.view.json {
        println!("{}", crate::report::to_json(&histories)?);
    } else {
        print!("{}", crate::report::format_city_histories(&histories));
    }
    Ok(())
}

fn log_level(cli: &Cli) -> LevelFilter {
    if let Some(level) = std::env::var(LOG_ENV).ok().and_then(|v| v.parse().ok()) {
        return level;
    }
    if cli.quiet {
        return LevelFilter::Off;
    }
    match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // Only fails if a logger is already installed.
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).ok();
}
