// 📐 Validation - Field rules for coins added to a collection
// Collects every failure; callers surface the first one

use crate::collection::NewCoin;
use chrono::{Datelike, Utc};

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_TEXT_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate against the current calendar year
pub fn validate_new_coin(coin: &NewCoin) -> ValidationResult {
    validate_new_coin_at(coin, Utc::now().year())
}

/// Validate with an explicit "current year" (years up to next year are accepted)
pub fn validate_new_coin_at(coin: &NewCoin, current_year: i32) -> ValidationResult {
    let mut errors = Vec::new();

    let name_len = coin.name.trim().chars().count();
    if name_len == 0 {
        errors.push(ValidationError::new("name", "Name is required"));
    } else if name_len > MAX_NAME_LEN {
        errors.push(ValidationError::new(
            "name",
            format!("Must be at most {} characters", MAX_NAME_LEN),
        ));
    }

    for (field, value) in [
        ("country", &coin.country),
        ("denomination", &coin.denomination),
        ("metal", &coin.metal),
    ] {
        if let Some(text) = value {
            if text.trim().chars().count() > MAX_TEXT_LEN {
                errors.push(ValidationError::new(
                    field,
                    format!("Must be at most {} characters", MAX_TEXT_LEN),
                ));
            }
        }
    }

    if let Some(year) = coin.year {
        let max_year = current_year + 1;
        if year < 1 || year > max_year {
            errors.push(ValidationError::new(
                "year",
                format!("Must be between 1 and {}, got {}", max_year, year),
            ));
        }
    }

    for (field, value) in [("weight", coin.weight), ("diameter", coin.diameter)] {
        if let Some(measure) = value {
            // NaN fails this check too
            if !(measure > 0.0) {
                errors.push(ValidationError::new(
                    field,
                    format!("Must be positive, got {}", measure),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_coin() -> NewCoin {
        NewCoin {
            name: "1947 Quarter Anna".to_string(),
            country: Some("India".to_string()),
            denomination: Some("¼ Anna".to_string()),
            year: Some(1947),
            metal: Some("Cupro-Nickel".to_string()),
            weight: Some(2.9),
            diameter: Some(19.0),
            ..NewCoin::default()
        }
    }

    #[test]
    fn test_valid_coin() {
        assert!(validate_new_coin_at(&create_test_coin(), 2025).is_ok());
    }

    #[test]
    fn test_name_required() {
        let mut coin = create_test_coin();
        coin.name = "   ".to_string();

        let errors = validate_new_coin_at(&coin, 2025).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Name is required");
    }

    #[test]
    fn test_text_length_limits() {
        let mut coin = create_test_coin();
        coin.name = "x".repeat(201);
        coin.metal = Some("y".repeat(101));
        coin.country = Some("z".repeat(100));

        let errors = validate_new_coin_at(&coin, 2025).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "metal"]);
    }

    #[test]
    fn test_year_bounds() {
        let mut coin = create_test_coin();

        coin.year = Some(2026);
        assert!(validate_new_coin_at(&coin, 2025).is_ok());

        coin.year = Some(2027);
        assert!(validate_new_coin_at(&coin, 2025).is_err());

        coin.year = Some(0);
        let errors = validate_new_coin_at(&coin, 2025).unwrap_err();
        assert_eq!(errors[0].field, "year");
    }

    #[test]
    fn test_measures_must_be_positive() {
        let mut coin = create_test_coin();
        coin.weight = Some(0.0);
        coin.diameter = Some(-3.0);

        let errors = validate_new_coin_at(&coin, 2025).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "weight: Must be positive, got 0");
    }

    #[test]
    fn test_absent_optionals_are_fine() {
        let coin = NewCoin {
            name: "Unknown token".to_string(),
            ..NewCoin::default()
        };
        assert!(validate_new_coin(&coin).is_ok());
    }
}
