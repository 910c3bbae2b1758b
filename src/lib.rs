//! `citypop` library crate.
//!
//! Loads the U.S. city population table (one row per city, one column per
//! census year) and derives per-city marker encodings for a map layer.
//!
//! The binary (`citypop`) is a thin wrapper around this library so that:
//!
//! - the loader and encoder are testable without spawning processes
//! - a map front-end can depend on the same code

pub mod app;
pub mod cli;
pub mod domain;
pub mod encode;
pub mod error;
pub mod io;
pub mod report;
