//! Export the generated dataset to CSV.
//!
//! One file, written wholesale, once per run. Category labels can contain
//! commas (e.g. `חינוך, תרבות ובידור`), so rows go through the csv writer
//! for proper quoting rather than hand-formatted lines.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Dataset;
use crate::error::AppError;

/// Fixed leading columns; one column per expense category follows.
pub const FIXED_COLUMNS: [&str; 4] = ["user_id", "profile_type", "income", "total_expense"];

/// Write the dataset to `path`, overwriting any existing file.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::output(format!(
            "Failed to create output CSV '{}': {e}",
            path.display()
        ))
    })?;

    // UTF-8 BOM so spreadsheet tools pick the right encoding for the Hebrew
    // labels (the equivalent of a utf-8-sig export).
    file.write_all("\u{feff}".as_bytes())
        .map_err(|e| AppError::output(format!("Failed to write output CSV: {e}")))?;

    let mut writer = csv::Writer::from_writer(file);

    let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
    header.extend(dataset.categories.iter().map(String::as_str));
    writer
        .write_record(&header)
        .map_err(|e| AppError::output(format!("Failed to write output CSV header: {e}")))?;

    let mut row: Vec<String> = Vec::with_capacity(header.len());
    for record in &dataset.records {
        row.clear();
        row.push(record.user_id.to_string());
        row.push(record.profile_type.clone());
        row.push(format!("{}", record.income));
        row.push(format!("{}", record.total_expense));
        for spend in &record.category_spend {
            row.push(format!("{spend}"));
        }
        writer
            .write_record(&row)
            .map_err(|e| AppError::output(format!("Failed to write output CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush output CSV: {e}")))?;

    Ok(())
}
