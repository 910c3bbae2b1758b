//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - table cells and validated city rows (`Cell`, `CityRecord`)
//! - the loaded corpus and its queries (`Dataset`, `YearRange`)
//! - derived map output (`VisualEncoding`, `Marker`, `YearTotal`)

pub mod dataset;
pub mod types;

pub use dataset::*;
pub use types::*;
