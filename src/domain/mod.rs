//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - reference data shapes (`CategoryShares`, `ReferenceScalars`)
//! - demographic archetypes (`Profile`)
//! - generated output (`HouseholdRecord`, `Dataset`, `DatasetStats`)

pub mod types;

pub use types::*;
