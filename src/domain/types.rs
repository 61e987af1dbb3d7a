//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - borrowed read-only during generation
//! - loaded from user-supplied JSON (profiles)
//! - exported to CSV

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Baseline expense composition for the reference year.
///
/// Entries preserve the source table's row order because that order drives the
/// output column order. Percentages are pass-through from the source: values
/// in 0-100 with no guarantee they sum to exactly 100. A single instance is
/// shared (borrowed) by every profile and every record draw; it is never
/// copied per profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShares {
    entries: Vec<(String, f64)>,
}

impl CategoryShares {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(category, percentage)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(name, share)| (name.as_str(), *share))
    }

    /// Category names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn share(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == category)
            .map(|(_, share)| *share)
    }
}

/// Aggregate household averages for the reference year. Immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceScalars {
    /// Average net money income per household (currency units).
    pub avg_net_income: f64,
    /// Average total consumption expense per household (currency units).
    pub avg_total_expense: f64,
}

/// Everything the reference loader produces for one reference year.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub year: String,
    pub shares: CategoryShares,
    pub scalars: ReferenceScalars,
}

/// A named demographic archetype.
///
/// Multipliers scale the reference-year aggregates; `deviations` scales
/// individual category shares on top of the baseline. Categories absent from
/// `deviations` use multiplier 1.0. Deserializable so a custom profile set
/// can be supplied as a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub income_multiplier: f64,
    pub expense_multiplier: f64,
    #[serde(default)]
    pub deviations: HashMap<String, f64>,
}

/// One synthetic household. Created once, never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdRecord {
    /// Sequential, unique, 0-based.
    pub user_id: u64,
    /// Name of the profile this record was drawn from.
    pub profile_type: String,
    pub income: f64,
    pub total_expense: f64,
    /// Per-category spend, aligned with the dataset's category order.
    ///
    /// The per-category jitter is independent, so these do not sum to
    /// `total_expense`.
    pub category_spend: Vec<f64>,
}

/// The generated population, in ascending `user_id` order.
///
/// Built entirely in memory, then serialized once; no further mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Category column order (the source table's row order).
    pub categories: Vec<String>,
    pub records: Vec<HouseholdRecord>,
}

/// Summary stats about the generated records (for the terminal report).
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_records: usize,
    pub income_min: f64,
    pub income_mean: f64,
    pub income_max: f64,
    pub expense_min: f64,
    pub expense_mean: f64,
    pub expense_max: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub records: usize,
    /// Fixed seed for reproducible output; `None` draws from entropy.
    pub seed: Option<u64>,
    pub year: String,
    pub shares_path: PathBuf,
    pub totals_path: PathBuf,
    /// Banner rows above the header in both reference tables.
    pub skip_rows: usize,
    pub profiles_path: Option<PathBuf>,
    pub output: PathBuf,
    pub quiet: bool,
}
