//! Shared generation pipeline used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! reference ingest -> profile resolution -> sampling -> stats
//!
//! The CLI then focuses on presentation and the single output write.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::profiles;
use crate::data::sample::{compute_stats, generate};
use crate::domain::{Dataset, DatasetStats, GenerateConfig, Profile, ReferenceData};
use crate::error::AppError;
use crate::io::ingest;

/// All computed outputs of a single `hsynth generate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub reference: ReferenceData,
    pub profiles: Vec<Profile>,
    pub dataset: Dataset,
    pub stats: Option<DatasetStats>,
}

/// Execute the full generation pipeline and return the computed outputs.
pub fn run_generate(config: &GenerateConfig) -> Result<RunOutput, AppError> {
    // 1) Load the reference tables. Any missing key aborts here, before a
    //    single record is drawn.
    let reference = ingest::load_reference(
        &config.shares_path,
        &config.totals_path,
        &config.year,
        config.skip_rows,
    )?;

    // 2) Resolve the profile set (built-in unless a JSON override is given).
    let profiles = profiles::resolve(config.profiles_path.as_deref())?;

    // 3) Build the random source. It is passed down explicitly so a fixed
    //    seed reproduces the dataset byte for byte.
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // 4) Sample the population.
    let dataset = generate(
        config.records,
        &profiles,
        &reference.shares,
        &reference.scalars,
        &mut rng,
    )?;

    let stats = compute_stats(&dataset);

    Ok(RunOutput {
        reference,
        profiles,
        dataset,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    const SHARES_CSV: &str = "banner,,\nbanner,,\nCategory,2022\nמזון,21.5\nדיור,25.0\nבריאות,6.0\n";
    const TOTALS_CSV: &str = "banner,,\nbanner,,\nYear,הכנסה כספית נטו למשק בית,הוצאה לתצרוכת*\n2022,\"21,706\",\"17,276\"\n";

    fn config(dir: &Path, year: &str, records: usize, seed: Option<u64>) -> GenerateConfig {
        let shares_path = dir.join("shares.csv");
        let totals_path = dir.join("totals.csv");
        std::fs::write(&shares_path, SHARES_CSV).unwrap();
        std::fs::write(&totals_path, TOTALS_CSV).unwrap();

        GenerateConfig {
            records,
            seed,
            year: year.to_string(),
            shares_path,
            totals_path,
            skip_rows: 2,
            profiles_path: None,
            output: dir.join("out.csv"),
            quiet: true,
        }
    }

    #[test]
    fn end_to_end_run_is_reproducible() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), "2022", 200, Some(42));

        let a = run_generate(&config).unwrap();
        let b = run_generate(&config).unwrap();

        assert_eq!(a.dataset, b.dataset);
        assert_eq!(a.stats.as_ref().unwrap().n_records, 200);
        assert_eq!(a.profiles.len(), 6);
        assert_eq!(a.dataset.categories, ["מזון", "דיור", "בריאות"]);
    }

    #[test]
    fn missing_year_aborts_before_any_output() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), "1999", 200, Some(42));

        let err = run_generate(&config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("1999"), "message: {err}");
        assert!(!config.output.exists(), "no output may exist after a failed run");
    }

    #[test]
    fn zero_records_is_a_valid_run() {
        let dir = tempdir().unwrap();
        let config = config(dir.path(), "2022", 0, Some(1));

        let run = run_generate(&config).unwrap();
        assert!(run.dataset.records.is_empty());
        assert!(run.stats.is_none());
        assert_eq!(run.dataset.categories.len(), 3);
    }
}
