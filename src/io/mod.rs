//! Input/output helpers.
//!
//! - reference table ingest + validation (`ingest`)
//! - dataset CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
