//! Canonicalization of raw field values
//!
//! The extraction model returns whatever the caller said: `"ab12 cde"`,
//! `"120k"`, `"45,000 miles"`, `"expired"`. These helpers turn that into
//! canonical stored values. All are pure; only mileage can fail.

use crate::error::{NormalizationError, Result};
use serde::{Deserialize, Serialize};

/// Mileage as the model may report it: an integer, a float, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MileageValue {
    Count(i64),
    Approx(f64),
    Text(String),
}

/// Warranty as the model may report it: a boolean or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WarrantyValue {
    Flag(bool),
    Text(String),
}

const WARRANTY_AFFIRMATIVE: [&str; 5] = ["yes", "y", "true", "under warranty", "active"];
const WARRANTY_NEGATIVE: [&str; 5] = ["no", "n", "false", "not under warranty", "expired"];

/// Strip whitespace and uppercase a registration plate. Total.
pub fn normalize_registration(reg: &str) -> String {
    reg.split_whitespace().collect::<String>().to_uppercase()
}

/// Convert a mileage value to a whole number of miles.
///
/// Strings have `"miles"` and commas stripped; a trailing `k` multiplies
/// by 1000 (`"120k"` → 120000); anything else parses as a float and
/// truncates. A non-numeric residue is a [`NormalizationError`].
pub fn normalize_mileage(value: &MileageValue) -> Result<i64> {
    match value {
        MileageValue::Count(n) => Ok(*n),
        MileageValue::Approx(f) => Ok(*f as i64),
        MileageValue::Text(text) => {
            let cleaned = text.to_lowercase().replace("miles", "").replace(',', "");
            let cleaned = cleaned.trim();
            if let Some(thousands) = cleaned.strip_suffix('k') {
                let n: f64 = thousands
                    .trim()
                    .parse()
                    .map_err(|_| NormalizationError::Mileage(text.clone()))?;
                return Ok((n * 1000.0) as i64);
            }
            let n: f64 = cleaned
                .parse()
                .map_err(|_| NormalizationError::Mileage(text.clone()))?;
            Ok(n as i64)
        }
    }
}

/// Convert a warranty value to a boolean.
///
/// Recognized affirmative/negative tokens map directly; any other string
/// coerces by non-emptiness. The non-emptiness fallback can misclassify
/// an unrecognized answer and is deliberately kept as-is until product
/// intent is settled.
pub fn normalize_warranty(value: &WarrantyValue) -> bool {
    match value {
        WarrantyValue::Flag(b) => *b,
        WarrantyValue::Text(text) => {
            let lower = text.to_lowercase();
            if WARRANTY_AFFIRMATIVE.contains(&lower.as_str()) {
                true
            } else if WARRANTY_NEGATIVE.contains(&lower.as_str()) {
                false
            } else {
                !text.is_empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_strips_spaces_and_uppercases() {
        assert_eq!(normalize_registration("ab12 cde"), "AB12CDE");
        assert_eq!(normalize_registration(" AB12CDE "), "AB12CDE");
    }

    #[test]
    fn mileage_accepts_integers_directly() {
        assert_eq!(normalize_mileage(&MileageValue::Count(5000)).unwrap(), 5000);
    }

    #[test]
    fn mileage_truncates_floats() {
        assert_eq!(
            normalize_mileage(&MileageValue::Approx(45000.7)).unwrap(),
            45000
        );
    }

    #[test]
    fn mileage_parses_k_shorthand() {
        assert_eq!(
            normalize_mileage(&MileageValue::Text("120k".into())).unwrap(),
            120_000
        );
        assert_eq!(
            normalize_mileage(&MileageValue::Text("7.5k".into())).unwrap(),
            7500
        );
    }

    #[test]
    fn mileage_strips_miles_and_commas() {
        assert_eq!(
            normalize_mileage(&MileageValue::Text("45,000 miles".into())).unwrap(),
            45000
        );
    }

    #[test]
    fn mileage_rejects_non_numeric_residue() {
        assert!(normalize_mileage(&MileageValue::Text("quite a lot".into())).is_err());
    }

    #[test]
    fn warranty_maps_token_lists() {
        assert!(normalize_warranty(&WarrantyValue::Text("yes".into())));
        assert!(normalize_warranty(&WarrantyValue::Text("Under Warranty".into())));
        assert!(!normalize_warranty(&WarrantyValue::Text("expired".into())));
        assert!(!normalize_warranty(&WarrantyValue::Text("no".into())));
    }

    #[test]
    fn warranty_passes_booleans_through() {
        assert!(normalize_warranty(&WarrantyValue::Flag(true)));
        assert!(!normalize_warranty(&WarrantyValue::Flag(false)));
    }

    #[test]
    fn warranty_unrecognized_string_coerces_by_non_emptiness() {
        // Known ambiguity, preserved on purpose.
        assert!(normalize_warranty(&WarrantyValue::Text("maybe".into())));
        assert!(!normalize_warranty(&WarrantyValue::Text(String::new())));
    }
}
