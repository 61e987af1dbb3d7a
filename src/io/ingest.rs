//! Reference table ingest and normalization.
//!
//! This module turns the two statistical source tables into the reference
//! data the generator consumes:
//!
//! - the **composition table** (categories × years, percent of total expense)
//! - the **totals table** (years × aggregates, currency units)
//!
//! Design goals:
//! - **Fail fast**: any missing year/row/column or malformed numeric cell
//!   aborts the run with exit code 2, naming the offending key. No partial
//!   dataset is ever generated from incomplete reference data.
//! - **Tolerate survey-export formatting**: banner rows above the header,
//!   UTF-8 BOM, thousands separators, stray whitespace around labels.
//! - **Separation of concerns**: no sampling logic here.

use std::fs::File;
use std::path::Path;

use crate::domain::{CategoryShares, ReferenceData, ReferenceScalars};
use crate::error::AppError;

/// Totals-table column holding average net money income per household.
pub const NET_INCOME_COLUMN: &str = "הכנסה כספית נטו למשק בית";

/// Totals-table column holding average consumption expenditure per household.
pub const CONSUMPTION_COLUMN: &str = "הוצאה לתצרוכת*";

/// Load both reference tables for one year.
pub fn load_reference(
    shares_path: &Path,
    totals_path: &Path,
    year: &str,
    skip_rows: usize,
) -> Result<ReferenceData, AppError> {
    let shares = load_category_shares(shares_path, year, skip_rows)?;
    let scalars = load_reference_scalars(totals_path, year, skip_rows)?;
    Ok(ReferenceData {
        year: year.to_string(),
        shares,
        scalars,
    })
}

/// Load the per-category percentage-of-total-expense mapping for `year`.
///
/// The first column holds category names; the remaining columns are years.
/// Rows keep their file order (it becomes the output column order).
pub fn load_category_shares(
    path: &Path,
    year: &str,
    skip_rows: usize,
) -> Result<CategoryShares, AppError> {
    let table = read_table(path, skip_rows)?;

    let year_idx = find_column(&table.header, year).ok_or_else(|| {
        AppError::input(format!(
            "Year column '{year}' not found in composition table '{}'.",
            path.display()
        ))
    })?;

    let mut entries = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        // Rows without a category label are section breaks in survey exports.
        let Some(category) = row.first().map(String::as_str).filter(|s| !s.is_empty()) else {
            continue;
        };

        let cell = row
            .get(year_idx)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::input(format!(
                    "Missing percentage for category '{category}', year {year} in '{}'.",
                    path.display()
                ))
            })?;

        let share = parse_reference_number(cell).map_err(|e| {
            AppError::input(format!(
                "Invalid percentage for category '{category}', year {year}: {e}."
            ))
        })?;

        entries.push((category.to_string(), share));
    }

    if entries.is_empty() {
        return Err(AppError::input(format!(
            "No category rows found in composition table '{}'.",
            path.display()
        )));
    }

    Ok(CategoryShares::new(entries))
}

/// Load the two aggregate averages for `year` from the totals table.
///
/// The first column holds years; the scalar columns are matched by their
/// exact (trimmed) labels.
pub fn load_reference_scalars(
    path: &Path,
    year: &str,
    skip_rows: usize,
) -> Result<ReferenceScalars, AppError> {
    let table = read_table(path, skip_rows)?;

    let income_idx = find_column(&table.header, NET_INCOME_COLUMN).ok_or_else(|| {
        AppError::input(format!(
            "Column '{NET_INCOME_COLUMN}' not found in totals table '{}'.",
            path.display()
        ))
    })?;
    let expense_idx = find_column(&table.header, CONSUMPTION_COLUMN).ok_or_else(|| {
        AppError::input(format!(
            "Column '{CONSUMPTION_COLUMN}' not found in totals table '{}'.",
            path.display()
        ))
    })?;

    let row = table
        .rows
        .iter()
        .find(|row| row.first().map(String::as_str) == Some(year))
        .ok_or_else(|| {
            AppError::input(format!(
                "Year row '{year}' not found in totals table '{}'.",
                path.display()
            ))
        })?;

    let avg_net_income = scalar_cell(row, income_idx, NET_INCOME_COLUMN, year, path)?;
    let avg_total_expense = scalar_cell(row, expense_idx, CONSUMPTION_COLUMN, year, path)?;

    Ok(ReferenceScalars {
        avg_net_income,
        avg_total_expense,
    })
}

fn scalar_cell(
    row: &[String],
    idx: usize,
    column: &str,
    year: &str,
    path: &Path,
) -> Result<f64, AppError> {
    let cell = row
        .get(idx)
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AppError::input(format!(
                "Missing value for '{column}', year {year} in '{}'.",
                path.display()
            ))
        })?;

    parse_reference_number(cell)
        .map_err(|e| AppError::input(format!("Invalid value for '{column}', year {year}: {e}.")))
}

struct RawTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Read a CSV table whose header sits below `skip_rows` banner rows.
fn read_table(path: &Path, skip_rows: usize) -> Result<RawTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open reference table '{}': {e}",
            path.display()
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = reader.records();

    for _ in 0..skip_rows {
        match records.next() {
            Some(result) => {
                result.map_err(|e| {
                    AppError::input(format!("CSV parse error in '{}': {e}", path.display()))
                })?;
            }
            None => {
                return Err(AppError::input(format!(
                    "Reference table '{}' ended before the header row ({} banner rows expected).",
                    path.display(),
                    skip_rows
                )));
            }
        }
    }

    let header = records
        .next()
        .ok_or_else(|| {
            AppError::input(format!(
                "Reference table '{}' is missing a header row.",
                path.display()
            ))
        })?
        .map_err(|e| AppError::input(format!("CSV parse error in '{}': {e}", path.display())))?
        .iter()
        .map(normalize_label)
        .collect();

    let mut rows = Vec::new();
    for result in records {
        let record = result
            .map_err(|e| AppError::input(format!("CSV parse error in '{}': {e}", path.display())))?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(record.iter().map(normalize_label).collect());
    }

    Ok(RawTable { header, rows })
}

fn find_column(header: &[String], label: &str) -> Option<usize> {
    header.iter().position(|cell| cell == label)
}

fn normalize_label(raw: &str) -> String {
    // Excel-style UTF-8 exports often carry a BOM on the very first cell.
    raw.trim().trim_start_matches('\u{feff}').trim().to_string()
}

/// Parse a numeric reference cell after stripping grouping characters.
///
/// Survey exports format currency with thousands separators and sometimes
/// no-break spaces; both are stripped before parsing.
fn parse_reference_number(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '\u{00a0}' | '\u{202f}'))
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("cannot parse '{raw}' as a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const SHARES_CSV: &str = "\u{feff}Household expenditure survey,,\nPercent of consumption expenditure,,\nCategory,2021,2022\nמזון,20.0,21.5\nדיור,24.0,25.0\n\"חינוך, תרבות ובידור\",12.0,13.5\n";

    const TOTALS_CSV: &str = "Income survey,,\nMonthly averages per household,,\nYear,הכנסה כספית נטו למשק בית,הוצאה לתצרוכת*\n2021,\"20,123\",\"16,020\"\n2022,\"21,706\",\"17,276\"\n";

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_shares_and_scalars() {
        let dir = tempdir().unwrap();
        let shares_path = write_file(dir.path(), "shares.csv", SHARES_CSV);
        let totals_path = write_file(dir.path(), "totals.csv", TOTALS_CSV);

        let reference = load_reference(&shares_path, &totals_path, "2022", 2).unwrap();

        assert_eq!(reference.year, "2022");
        assert_eq!(reference.shares.len(), 3);
        // Source row order is preserved and BOM/quoted labels survive intact.
        let names: Vec<&str> = reference.shares.names().collect();
        assert_eq!(names, ["מזון", "דיור", "חינוך, תרבות ובידור"]);
        assert_eq!(reference.shares.share("מזון"), Some(21.5));
        assert_eq!(reference.shares.share("חינוך, תרבות ובידור"), Some(13.5));

        assert!((reference.scalars.avg_net_income - 21706.0).abs() < 1e-9);
        assert!((reference.scalars.avg_total_expense - 17276.0).abs() < 1e-9);
    }

    #[test]
    fn missing_year_column_is_fatal() {
        let dir = tempdir().unwrap();
        let shares_path = write_file(dir.path(), "shares.csv", SHARES_CSV);

        let err = load_category_shares(&shares_path, "2023", 2).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("2023"), "message: {err}");
    }

    #[test]
    fn missing_year_row_is_fatal() {
        let dir = tempdir().unwrap();
        let totals_path = write_file(dir.path(), "totals.csv", TOTALS_CSV);

        let err = load_reference_scalars(&totals_path, "2019", 2).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("2019"), "message: {err}");
    }

    #[test]
    fn missing_scalar_column_is_fatal() {
        let dir = tempdir().unwrap();
        let totals_path = write_file(
            dir.path(),
            "totals.csv",
            "banner,,\nbanner,,\nYear,הכנסה כספית נטו למשק בית\n2022,\"21,706\"\n",
        );

        let err = load_reference_scalars(&totals_path, "2022", 2).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(CONSUMPTION_COLUMN), "message: {err}");
    }

    #[test]
    fn malformed_numeric_cell_is_fatal() {
        let dir = tempdir().unwrap();
        let totals_path = write_file(
            dir.path(),
            "totals.csv",
            "banner,,\nbanner,,\nYear,הכנסה כספית נטו למשק בית,הוצאה לתצרוכת*\n2022,n/a,\"17,276\"\n",
        );

        let err = load_reference_scalars(&totals_path, "2022", 2).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("n/a"), "message: {err}");
    }

    #[test]
    fn missing_category_percentage_is_fatal() {
        let dir = tempdir().unwrap();
        let shares_path = write_file(
            dir.path(),
            "shares.csv",
            "banner,,\nbanner,,\nCategory,2022\nמזון,21.5\nדיור,\n",
        );

        let err = load_category_shares(&shares_path, "2022", 2).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("דיור"), "message: {err}");
    }

    #[test]
    fn blank_and_unlabeled_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let shares_path = write_file(
            dir.path(),
            "shares.csv",
            "banner,,\nbanner,,\nCategory,2022\n,,\nמזון,21.5\n,section note\nדיור,25.0\n",
        );

        let shares = load_category_shares(&shares_path, "2022", 2).unwrap();
        let names: Vec<&str> = shares.names().collect();
        assert_eq!(names, ["מזון", "דיור"]);
    }

    #[test]
    fn parses_formatted_numbers() {
        assert_eq!(parse_reference_number("21,706").unwrap(), 21706.0);
        assert_eq!(parse_reference_number(" 1,234.5 ").unwrap(), 1234.5);
        assert_eq!(parse_reference_number("21\u{a0}706").unwrap(), 21706.0);
        assert_eq!(parse_reference_number("3.2").unwrap(), 3.2);
        assert!(parse_reference_number("").is_err());
        assert!(parse_reference_number("12a").is_err());
    }
}
