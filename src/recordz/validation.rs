//! Field validators shared by every record type.
//!
//! Validators are pure: they take raw user input (or an already typed value) and
//! return either the normalized value or a [`ValidationError`] carrying a reason
//! that can be shown to the user as-is. Entities call them from their
//! constructors, and the CLI calls them one field at a time so that a bad value
//! is reported before anything else happens.
//!
//! Parsing and range checking are separate steps: `parse_*` turns text into a
//! number, `require_*` checks the number. Deserialized records skip the parse
//! step but always go through the range checks.

use thiserror::Error;

/// Why a single field was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{field} contains invalid character '{ch}' (only letters, spaces, hyphens, apostrophes and periods allowed)")]
    InvalidCharacter { field: &'static str, ch: char },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be a whole number, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field} {detail}")]
    OutOfRange {
        field: &'static str,
        detail: String,
    },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("Invalid {field}: '{value}'. Choose from: {}", allowed.join(", "))]
    NotInList {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Invalid date '{value}', expected YYYY-MM-DD (e.g. 2023-10-27)")]
    InvalidDate { value: String },

    #[error("Date {date} is in the future")]
    FutureDate { date: String },

    #[error("At least one subject with a score is required")]
    NoSubjects,

    #[error("{field} must look like {expected}, got '{value}'")]
    Format {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trims `raw` and rejects it if nothing is left.
pub fn require_text(field: &'static str, raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Parses a finite decimal number.
pub fn parse_number(field: &'static str, raw: &str) -> ValidationResult<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            field,
            value: trimmed.to_string(),
        }),
    }
}

/// Parses a whole number. A leading `+` is accepted.
pub fn parse_integer(field: &'static str, raw: &str) -> ValidationResult<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: trimmed.to_string(),
        })
}

/// Rounds a money-like value to cents and checks that the result is finite
/// and strictly positive.
pub fn require_positive(field: &'static str, value: f64) -> ValidationResult<f64> {
    let rounded = round2(value);
    if !rounded.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            value: value.to_string(),
        });
    }
    if rounded <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(rounded)
}

/// Adds up money values and rounds the total to cents. A total too large for
/// an `f64` is an error rather than infinity.
pub fn sum_money<I>(field: &'static str, values: I) -> ValidationResult<f64>
where
    I: IntoIterator<Item = f64>,
{
    let total = round2(values.into_iter().sum());
    if !total.is_finite() {
        return Err(ValidationError::OutOfRange {
            field,
            detail: "is too large to represent".to_string(),
        });
    }
    Ok(total)
}

/// Matches `raw` against a fixed list, ignoring case and surrounding whitespace.
///
/// Returns the canonical spelling from `allowed`.
pub fn match_choice(
    field: &'static str,
    raw: &str,
    allowed: &'static [&'static str],
) -> ValidationResult<&'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    allowed
        .iter()
        .copied()
        .find(|choice| choice.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| ValidationError::NotInList {
            field,
            value: trimmed.to_string(),
            allowed,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: &[&str] = &["Red", "Dark Blue"];

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(10.0), 10.0);
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("Title", "  Dune ").unwrap(), "Dune");
        assert_eq!(
            require_text("Title", "   "),
            Err(ValidationError::Empty { field: "Title" })
        );
    }

    #[test]
    fn parse_number_rejects_garbage_and_infinity() {
        assert_eq!(parse_number("Price", " 12.5 ").unwrap(), 12.5);
        assert!(matches!(
            parse_number("Price", "abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(parse_number("Price", "inf").is_err());
        assert!(parse_number("Price", "NaN").is_err());
    }

    #[test]
    fn parse_integer_rejects_decimals() {
        assert_eq!(parse_integer("Stock", "+7").unwrap(), 7);
        assert_eq!(parse_integer("Stock", "-3").unwrap(), -3);
        assert!(matches!(
            parse_integer("Stock", "2.5"),
            Err(ValidationError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn require_positive_rounds() {
        assert_eq!(require_positive("Amount", 19.999).unwrap(), 20.0);
        assert_eq!(
            require_positive("Amount", 0.0),
            Err(ValidationError::NotPositive { field: "Amount" })
        );
        assert!(require_positive("Amount", -4.0).is_err());
        assert!(require_positive("Amount", f64::NAN).is_err());
    }

    #[test]
    fn require_positive_checks_the_rounded_value() {
        assert_eq!(
            require_positive("Price", 0.004),
            Err(ValidationError::NotPositive { field: "Price" })
        );
        assert_eq!(require_positive("Price", 0.005).unwrap(), 0.01);
        assert!(matches!(
            require_positive("Price", 1.7e308),
            Err(ValidationError::NotANumber { field: "Price", .. })
        ));
        assert!(require_positive("Price", f64::MAX / 1000.0).is_ok());
    }

    #[test]
    fn sum_money_rejects_overflowing_totals() {
        assert_eq!(sum_money("Total", [0.1, 0.2, 10.0]).unwrap(), 10.3);
        assert_eq!(sum_money("Total", Vec::new()).unwrap(), 0.0);
        assert!(matches!(
            sum_money("Total", [1.0e306, 1.0e306]),
            Err(ValidationError::OutOfRange { field: "Total", .. })
        ));
    }

    #[test]
    fn match_choice_returns_canonical_spelling() {
        assert_eq!(match_choice("Color", "dark BLUE", COLORS).unwrap(), "Dark Blue");
        assert_eq!(match_choice("Color", " red", COLORS).unwrap(), "Red");
    }

    #[test]
    fn match_choice_lists_allowed_values() {
        let err = match_choice("Color", "green", COLORS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid Color: 'green'. Choose from: Red, Dark Blue"
        );
    }
}
