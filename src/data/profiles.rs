//! Demographic profile sets: the built-in archetypes and JSON overrides.
//!
//! The built-in set models six Israeli household archetypes against the
//! expenditure-survey category labels. A custom set can be supplied as a JSON
//! array of profiles; it replaces the built-ins wholesale.
//!
//! Deviation keys that match no category in the loaded composition table are
//! inert: the generator iterates the composition's categories, so an unused
//! key simply never applies. That lets one profile file serve source tables
//! with slightly different category sets.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

use crate::domain::Profile;
use crate::error::AppError;

/// The built-in profile set, in a stable order (profile choice is uniform
/// over this order, so the order is part of seeded reproducibility).
pub fn builtin_profiles() -> Vec<Profile> {
    vec![
        Profile {
            name: "משפחה צעירה (עד 3 ילדים)".to_string(),
            income_multiplier: 1.1,
            expense_multiplier: 1.05,
            deviations: deviations(&[
                ("דיור", 1.2),
                ("חינוך, תרבות ובידור", 1.3),
                ("מזון", 1.25),
            ]),
        },
        Profile {
            name: "משפחה מרובת ילדים (4+ ילדים)".to_string(),
            income_multiplier: 1.5,
            expense_multiplier: 1.4,
            deviations: deviations(&[
                ("מזון", 1.5),
                ("חינוך, תרבות ובידור", 1.8),
                ("הלבשה והנעלה", 1.5),
                ("דיור", 1.3),
            ]),
        },
        Profile {
            name: "סטודנטים".to_string(),
            income_multiplier: 0.4,
            expense_multiplier: 0.8,
            deviations: deviations(&[
                ("דיור", 1.3),
                ("תחבורה ותקשורת", 0.8),
                ("בילויים", 1.5),
            ]),
        },
        Profile {
            name: "רווקים".to_string(),
            income_multiplier: 0.8,
            expense_multiplier: 0.9,
            deviations: deviations(&[("דיור", 0.9), ("בילויים", 1.2)]),
        },
        Profile {
            name: "זוגות צעירים ללא ילדים".to_string(),
            income_multiplier: 1.2,
            expense_multiplier: 1.0,
            deviations: deviations(&[("חיסכון", 1.5), ("בילויים", 1.1)]),
        },
        Profile {
            name: "זוגות מבוגרים".to_string(),
            income_multiplier: 1.5,
            expense_multiplier: 1.2,
            deviations: deviations(&[("בריאות", 1.3), ("תרבות ופנאי", 1.5)]),
        },
    ]
}

/// Resolve the active profile set: a JSON override if given, else built-ins.
pub fn resolve(path: Option<&Path>) -> Result<Vec<Profile>, AppError> {
    match path {
        Some(path) => load_profiles_json(path),
        None => Ok(builtin_profiles()),
    }
}

/// Load and validate a profile set from a JSON file.
pub fn load_profiles_json(path: &Path) -> Result<Vec<Profile>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open profiles JSON '{}': {e}",
            path.display()
        ))
    })?;

    let profiles: Vec<Profile> = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid profiles JSON '{}': {e}", path.display())))?;

    validate_profiles(&profiles)?;
    Ok(profiles)
}

fn validate_profiles(profiles: &[Profile]) -> Result<(), AppError> {
    if profiles.is_empty() {
        return Err(AppError::input("Profiles JSON defines no profiles."));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for profile in profiles {
        if profile.name.trim().is_empty() {
            return Err(AppError::input("Profile with an empty name."));
        }
        if !seen.insert(profile.name.as_str()) {
            return Err(AppError::input(format!(
                "Duplicate profile name '{}'.",
                profile.name
            )));
        }
        if !(profile.income_multiplier.is_finite() && profile.income_multiplier > 0.0) {
            return Err(AppError::input(format!(
                "Profile '{}': income_multiplier must be positive and finite.",
                profile.name
            )));
        }
        if !(profile.expense_multiplier.is_finite() && profile.expense_multiplier > 0.0) {
            return Err(AppError::input(format!(
                "Profile '{}': expense_multiplier must be positive and finite.",
                profile.name
            )));
        }
        for (category, multiplier) in &profile.deviations {
            if !(multiplier.is_finite() && *multiplier > 0.0) {
                return Err(AppError::input(format!(
                    "Profile '{}': deviation for '{category}' must be positive and finite.",
                    profile.name
                )));
            }
        }
    }

    Ok(())
}

fn deviations(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(category, multiplier)| (category.to_string(), *multiplier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_set_is_valid() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 6);
        validate_profiles(&profiles).unwrap();
    }

    #[test]
    fn loads_profiles_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "בסיס", "income_multiplier": 1.0, "expense_multiplier": 1.0},
                {"name": "חוסכים", "income_multiplier": 1.2, "expense_multiplier": 0.7,
                 "deviations": {"חיסכון": 2.0}}
            ]"#,
        )
        .unwrap();

        let profiles = load_profiles_json(&path).unwrap();
        assert_eq!(profiles.len(), 2);
        // `deviations` is optional and defaults to empty.
        assert!(profiles[0].deviations.is_empty());
        assert_eq!(profiles[1].deviations.get("חיסכון"), Some(&2.0));
    }

    #[test]
    fn rejects_empty_profile_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "[]").unwrap();

        let err = load_profiles_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_nonpositive_multiplier() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(
            &path,
            r#"[{"name": "x", "income_multiplier": 0.0, "expense_multiplier": 1.0}]"#,
        )
        .unwrap();

        let err = load_profiles_json(&path).unwrap_err();
        assert!(err.to_string().contains("income_multiplier"), "message: {err}");
    }

    #[test]
    fn rejects_duplicate_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "x", "income_multiplier": 1.0, "expense_multiplier": 1.0},
                {"name": "x", "income_multiplier": 2.0, "expense_multiplier": 1.0}
            ]"#,
        )
        .unwrap();

        let err = load_profiles_json(&path).unwrap_err();
        assert!(err.to_string().contains("Duplicate"), "message: {err}");
    }
}
