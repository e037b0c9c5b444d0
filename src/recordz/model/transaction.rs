use crate::validation::{match_choice, parse_number, require_positive, ValidationError, ValidationResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The one category counted as income; everything else is an expense.
pub const INCOME_CATEGORY: &str = "Salary";

/// A dated income or expense entry.
///
/// `category` borrows from [`Transaction::CATEGORIES`], so `Deserialize` is
/// written by hand to stay lifetime-independent.
#[derive(Debug, Clone, Serialize)]
#[serde(into = "TransactionRecord")]
pub struct Transaction {
    id: Uuid,
    date: NaiveDate,
    category: &'static str,
    amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    date: String,
    category: String,
    amount: f64,
}

impl Transaction {
    pub const CATEGORIES: &'static [&'static str] = &[
        "Food",
        "Transport",
        "Utilities",
        "Rent",
        "Entertainment",
        "Shopping",
        "Salary",
        "Groceries",
        "Healthcare",
        "Education",
        "Miscellaneous",
    ];

    pub fn new(date: &str, category: &str, amount: f64) -> ValidationResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            date: Self::validate_date(date)?,
            category: Self::validate_category(category)?,
            amount: Self::validate_amount(amount)?,
        })
    }

    pub fn validate_date(raw: &str) -> ValidationResult<NaiveDate> {
        Self::validate_date_on(raw, Local::now().date_naive())
    }

    /// Parses `YYYY-MM-DD` and rejects dates after `today`.
    pub fn validate_date_on(raw: &str, today: NaiveDate) -> ValidationResult<NaiveDate> {
        let trimmed = raw.trim();
        let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
            ValidationError::InvalidDate {
                value: trimmed.to_string(),
            }
        })?;
        if date > today {
            return Err(ValidationError::FutureDate {
                date: date.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(date)
    }

    pub fn validate_category(raw: &str) -> ValidationResult<&'static str> {
        match_choice("category", raw, Self::CATEGORIES)
    }

    pub fn validate_amount(amount: f64) -> ValidationResult<f64> {
        require_positive("Amount", amount)
    }

    pub fn parse_amount(raw: &str) -> ValidationResult<f64> {
        Self::validate_amount(parse_number("Amount", raw)?)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_income(&self) -> bool {
        self.category == INCOME_CATEGORY
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(&record.date, &record.category, record.amount)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = TransactionRecord::deserialize(deserializer)?;
        Transaction::try_from(record).map_err(serde::de::Error::custom)
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(transaction: Transaction) -> Self {
        Self {
            date: transaction.date_string(),
            category: transaction.category.to_string(),
            amount: transaction.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn constructs_valid_transaction() {
        let t = Transaction::new("2023-10-27", "food", 12.345).unwrap();
        assert_eq!(t.date(), day(2023, 10, 27));
        assert_eq!(t.category(), "Food");
        assert_eq!(t.amount(), 12.35);
        assert!(!t.is_income());
        assert!(Transaction::new("2023-10-27", "SALARY", 100.0).unwrap().is_income());
    }

    #[test]
    fn rejects_future_dates() {
        assert!(matches!(
            Transaction::new("2999-01-01", "Food", 1.0),
            Err(ValidationError::FutureDate { .. })
        ));
        let today = day(2024, 3, 1);
        assert_eq!(Transaction::validate_date_on("2024-03-01", today).unwrap(), today);
        assert!(Transaction::validate_date_on("2024-03-02", today).is_err());
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in ["27/10/2023", "2023-02-30", "", "yesterday"] {
            assert!(
                matches!(
                    Transaction::validate_date(raw),
                    Err(ValidationError::InvalidDate { .. })
                ),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_unknown_category_and_non_positive_amount() {
        assert!(Transaction::validate_category("Gambling").is_err());
        assert!(Transaction::parse_amount("0").is_err());
        assert!(Transaction::parse_amount("-5").is_err());
        assert_eq!(Transaction::parse_amount("5.5").unwrap(), 5.5);
    }

    #[test]
    fn amount_must_stay_positive_and_finite_after_rounding() {
        assert!(matches!(
            Transaction::validate_amount(0.004),
            Err(ValidationError::NotPositive { .. })
        ));
        assert_eq!(Transaction::validate_amount(0.005).unwrap(), 0.01);
        assert!(Transaction::new("2024-01-01", "Food", 1.7e308).is_err());
        assert!(Transaction::parse_amount("1.7e308").is_err());
    }

    #[test]
    fn deserializes_from_owned_json_text() {
        fn owned<T: serde::de::DeserializeOwned>(raw: String) -> serde_json::Result<T> {
            serde_json::from_str(&raw)
        }
        let raw = r#"{"date": "2024-01-05", "category": "rent", "amount": 800}"#.to_string();
        let t: Transaction = owned(raw).unwrap();
        assert_eq!(t.category(), "Rent");

        let bad = r#"{"date": "2024-01-05", "category": "Rent", "amount": 0.001}"#.to_string();
        let err = owned::<Transaction>(bad).unwrap_err();
        assert!(err.to_string().contains("must be positive"), "{err}");
    }

    #[test]
    fn date_roundtrips_as_string() {
        let t = Transaction::new("2024-01-05", "Rent", 800.0).unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"date": "2024-01-05", "category": "Rent", "amount": 800.0})
        );
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back.date(), t.date());
        assert_eq!(back.category(), t.category());
        assert_eq!(back.amount(), t.amount());
    }
}
