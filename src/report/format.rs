//! Formatted terminal output for the `generate`, `inspect` and `profiles`
//! subcommands. Printing happens in `app`; only formatting lives here.

use crate::app::pipeline::RunOutput;
use crate::domain::{GenerateConfig, Profile, ReferenceData};

/// Format the full run summary (reference data + generation stats).
pub fn format_run_summary(run: &RunOutput, config: &GenerateConfig) -> String {
    let mut out = String::new();

    out.push_str("=== hsynth - Synthetic Household Budget Dataset ===\n");
    out.push_str(&format!("Reference year: {}\n", run.reference.year));
    out.push_str(&format!(
        "Reference: avg net income={:.2} | avg total expense={:.2}\n",
        run.reference.scalars.avg_net_income, run.reference.scalars.avg_total_expense
    ));
    out.push_str(&format!(
        "Categories: {} | Profiles: {}\n",
        run.reference.shares.len(),
        run.profiles.len()
    ));
    match config.seed {
        Some(seed) => out.push_str(&format!(
            "Records: {} | Seed: {seed}\n",
            run.dataset.records.len()
        )),
        None => out.push_str(&format!(
            "Records: {} | Seed: entropy\n",
            run.dataset.records.len()
        )),
    }

    if let Some(stats) = &run.stats {
        out.push_str(&format!(
            "Income : mean={:.2} [{:.2}, {:.2}]\n",
            stats.income_mean, stats.income_min, stats.income_max
        ));
        out.push_str(&format!(
            "Expense: mean={:.2} [{:.2}, {:.2}]\n",
            stats.expense_mean, stats.expense_min, stats.expense_max
        ));
    }

    out.push_str(&format!("Output: {}\n", config.output.display()));
    out
}

/// Format the reference dump for `hsynth inspect`.
pub fn format_reference(reference: &ReferenceData) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Reference data ({}) ===\n", reference.year));
    out.push_str(&format!(
        "Avg net income   : {:.2}\n",
        reference.scalars.avg_net_income
    ));
    out.push_str(&format!(
        "Avg total expense: {:.2}\n",
        reference.scalars.avg_total_expense
    ));

    out.push_str(&format!(
        "\nExpense composition ({} categories):\n",
        reference.shares.len()
    ));
    for (category, share) in reference.shares.iter() {
        out.push_str(&format!("{share:>6.2}%  {category}\n"));
    }
    let total: f64 = reference.shares.iter().map(|(_, share)| share).sum();
    out.push_str(&format!("{total:>6.2}%  (sum, pass-through from source)\n"));

    out
}

/// Format the profile table for `hsynth profiles`.
pub fn format_profiles(profiles: &[Profile]) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Profiles ({}) ===\n", profiles.len()));
    for profile in profiles {
        out.push_str(&format!(
            "- {} (income x{}, expense x{})\n",
            profile.name, profile.income_multiplier, profile.expense_multiplier
        ));
        let mut deviations: Vec<_> = profile.deviations.iter().collect();
        deviations.sort_by(|a, b| a.0.cmp(b.0));
        for (category, multiplier) in deviations {
            out.push_str(&format!("    {category}: x{multiplier}\n"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryShares, ReferenceScalars};

    fn reference() -> ReferenceData {
        ReferenceData {
            year: "2022".to_string(),
            shares: CategoryShares::new(vec![
                ("מזון".to_string(), 21.5),
                ("דיור".to_string(), 25.0),
            ]),
            scalars: ReferenceScalars {
                avg_net_income: 21_706.0,
                avg_total_expense: 17_276.0,
            },
        }
    }

    #[test]
    fn reference_dump_lists_categories_in_order() {
        let out = format_reference(&reference());
        assert!(out.contains("2022"));
        let food = out.find("מזון").unwrap();
        let housing = out.find("דיור").unwrap();
        assert!(food < housing, "source order lost:\n{out}");
        assert!(out.contains("46.50%"), "pass-through sum missing:\n{out}");
    }

    #[test]
    fn profile_table_names_every_profile() {
        let profiles = crate::data::profiles::builtin_profiles();
        let out = format_profiles(&profiles);
        for profile in &profiles {
            assert!(out.contains(&profile.name), "missing '{}'", profile.name);
        }
    }
}
