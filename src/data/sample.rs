//! Synthetic household generation from reference-year aggregates.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{
    CategoryShares, Dataset, DatasetStats, HouseholdRecord, Profile, ReferenceScalars,
};
use crate::error::AppError;

/// Standard deviation (currency units) of sampled household income.
///
/// Draws are not clamped, so a low-income profile can occasionally yield a
/// negative income. That tail is a documented property of the synthetic data,
/// not something to silently floor.
pub const INCOME_SD: f64 = 1000.0;

/// Standard deviation (currency units) of sampled total household expense.
/// Same no-clamping policy as income.
pub const EXPENSE_SD: f64 = 800.0;

/// Per-category jitter bounds (uniform, half-open).
///
/// Each category draw is scaled by an independent factor from this range, so
/// the category spends of a record do not sum exactly to its `total_expense`.
pub const JITTER_MIN: f64 = 0.9;
pub const JITTER_MAX: f64 = 1.1;

/// Generate `num_records` independent household records.
///
/// Per record: a profile is chosen uniformly at random, income and total
/// expense are drawn from normals around the profile-scaled reference
/// aggregates, and every category of `shares` gets a jittered spend derived
/// from its baseline percentage and the profile's deviation multiplier
/// (1.0 when absent).
///
/// Pure function of its inputs and `rng`: a fixed seed reproduces the dataset
/// exactly.
pub fn generate(
    num_records: usize,
    profiles: &[Profile],
    shares: &CategoryShares,
    scalars: &ReferenceScalars,
    rng: &mut StdRng,
) -> Result<Dataset, AppError> {
    if profiles.is_empty() {
        return Err(AppError::input("At least one profile is required."));
    }
    if shares.is_empty() {
        return Err(AppError::input("The category distribution is empty."));
    }
    if !(scalars.avg_net_income.is_finite() && scalars.avg_net_income > 0.0) {
        return Err(AppError::input(
            "Reference average net income must be positive and finite.",
        ));
    }
    if !(scalars.avg_total_expense.is_finite() && scalars.avg_total_expense > 0.0) {
        return Err(AppError::input(
            "Reference average total expense must be positive and finite.",
        ));
    }

    let noise = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::input(format!("Noise distribution error: {e}")))?;

    let mut records = Vec::with_capacity(num_records);
    for i in 0..num_records {
        let profile = &profiles[rng.gen_range(0..profiles.len())];

        let income =
            scalars.avg_net_income * profile.income_multiplier + INCOME_SD * noise.sample(rng);
        let total_expense = scalars.avg_total_expense * profile.expense_multiplier
            + EXPENSE_SD * noise.sample(rng);

        let mut category_spend = Vec::with_capacity(shares.len());
        for (category, share) in shares.iter() {
            let multiplier = profile.deviations.get(category).copied().unwrap_or(1.0);
            let jitter = rng.gen_range(JITTER_MIN..JITTER_MAX);
            category_spend.push(total_expense * share / 100.0 * multiplier * jitter);
        }

        records.push(HouseholdRecord {
            user_id: i as u64,
            profile_type: profile.name.clone(),
            income,
            total_expense,
            category_spend,
        });
    }

    Ok(Dataset {
        categories: shares.names().map(str::to_string).collect(),
        records,
    })
}

/// Summary stats over the generated records. `None` for an empty dataset.
pub fn compute_stats(dataset: &Dataset) -> Option<DatasetStats> {
    if dataset.records.is_empty() {
        return None;
    }

    let mut income_min = f64::INFINITY;
    let mut income_max = f64::NEG_INFINITY;
    let mut income_sum = 0.0;
    let mut expense_min = f64::INFINITY;
    let mut expense_max = f64::NEG_INFINITY;
    let mut expense_sum = 0.0;

    for record in &dataset.records {
        income_min = income_min.min(record.income);
        income_max = income_max.max(record.income);
        income_sum += record.income;
        expense_min = expense_min.min(record.total_expense);
        expense_max = expense_max.max(record.total_expense);
        expense_sum += record.total_expense;
    }

    let n = dataset.records.len();
    Some(DatasetStats {
        n_records: n,
        income_min,
        income_mean: income_sum / n as f64,
        income_max,
        expense_min,
        expense_mean: expense_sum / n as f64,
        expense_max,
    })
}
