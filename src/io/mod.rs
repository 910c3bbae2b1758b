//! Input helpers.
//!
//! - source text retrieval (`fetch`)
//! - CSV parsing with type inference (`table`)
//! - row validation into a `Dataset` (`ingest`)

pub mod fetch;
pub mod ingest;
pub mod table;

pub use fetch::*;
pub use ingest::*;
pub use table::*;
