use crate::validation::{
    parse_integer, parse_number, require_positive, require_text, ValidationError,
    ValidationResult,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A title in the bookstore inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BookRecord", into = "BookRecord")]
pub struct Book {
    id: Uuid,
    title: String,
    author: String,
    price: f64,
    stock: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookRecord {
    title: String,
    author: String,
    price: f64,
    stock: i64,
}

impl Book {
    pub fn new(title: &str, author: &str, price: f64, stock: i64) -> ValidationResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: Self::validate_text("Title", title)?,
            author: Self::validate_text("Author", author)?,
            price: Self::validate_price(price)?,
            stock: Self::validate_stock(stock)?,
        })
    }

    pub fn validate_text(field: &'static str, raw: &str) -> ValidationResult<String> {
        require_text(field, raw)
    }

    pub fn validate_price(price: f64) -> ValidationResult<f64> {
        require_positive("Price", price)
    }

    pub fn parse_price(raw: &str) -> ValidationResult<f64> {
        Self::validate_price(parse_number("Price", raw)?)
    }

    pub fn validate_stock(stock: i64) -> ValidationResult<u32> {
        if stock < 0 {
            return Err(ValidationError::Negative { field: "Stock" });
        }
        u32::try_from(stock).map_err(|_| ValidationError::OutOfRange {
            field: "Stock",
            detail: format!("cannot exceed {}", u32::MAX),
        })
    }

    pub fn parse_stock(raw: &str) -> ValidationResult<u32> {
        Self::validate_stock(parse_integer("Stock", raw)?)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Case-insensitive (title, author) comparison, the uniqueness key for books.
    pub fn same_key(&self, title: &str, author: &str) -> bool {
        self.title.to_lowercase() == title.trim().to_lowercase()
            && self.author.to_lowercase() == author.trim().to_lowercase()
    }

    pub fn set_title(&mut self, raw: &str) -> ValidationResult<()> {
        self.title = Self::validate_text("Title", raw)?;
        Ok(())
    }

    pub fn set_author(&mut self, raw: &str) -> ValidationResult<()> {
        self.author = Self::validate_text("Author", raw)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> ValidationResult<()> {
        self.price = Self::validate_price(price)?;
        Ok(())
    }

    pub fn set_stock(&mut self, stock: i64) -> ValidationResult<()> {
        self.stock = Self::validate_stock(stock)?;
        Ok(())
    }

    /// Applies a signed change to the stock; the result may not go below zero.
    pub fn adjust_stock(&mut self, delta: i64) -> ValidationResult<u32> {
        self.set_stock(i64::from(self.stock) + delta)?;
        Ok(self.stock)
    }
}

impl TryFrom<BookRecord> for Book {
    type Error = ValidationError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        Book::new(&record.title, &record.author, record.price, record.stock)
    }
}

impl From<Book> for BookRecord {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            author: book.author,
            price: book.price,
            stock: i64::from(book.stock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_trimmed_and_rounded() {
        let book = Book::new(" Dune ", "Frank Herbert ", 9.999, 3).unwrap();
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Frank Herbert");
        assert_eq!(book.price(), 10.0);
        assert_eq!(book.stock(), 3);
    }

    #[test]
    fn rejects_invalid_fields() {
        assert!(matches!(
            Book::new("", "A", 1.0, 1),
            Err(ValidationError::Empty { field: "Title" })
        ));
        assert!(matches!(
            Book::new("T", " ", 1.0, 1),
            Err(ValidationError::Empty { field: "Author" })
        ));
        assert!(matches!(
            Book::new("T", "A", 0.0, 1),
            Err(ValidationError::NotPositive { .. })
        ));
        assert!(matches!(
            Book::new("T", "A", 1.0, -1),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn price_is_checked_after_rounding_to_cents() {
        assert!(matches!(
            Book::new("Pamphlet", "Anon", 0.004, 1),
            Err(ValidationError::NotPositive { field: "Price" })
        ));
        assert_eq!(Book::new("Pamphlet", "Anon", 0.005, 1).unwrap().price(), 0.01);
        assert!(matches!(
            Book::new("Pamphlet", "Anon", 1.7e308, 1),
            Err(ValidationError::NotANumber { .. })
        ));
        let mut book = Book::new("Pamphlet", "Anon", 1.0, 1).unwrap();
        assert!(book.set_price(0.001).is_err());
        assert_eq!(book.price(), 1.0);
    }

    #[test]
    fn parses_raw_price_and_stock() {
        assert_eq!(Book::parse_price("12.345").unwrap(), 12.35);
        assert!(Book::parse_price("free").is_err());
        assert_eq!(Book::parse_stock("0").unwrap(), 0);
        assert!(Book::parse_stock("1.5").is_err());
    }

    #[test]
    fn key_comparison_ignores_case() {
        let book = Book::new("Dune", "Frank Herbert", 10.0, 1).unwrap();
        assert!(book.same_key("DUNE", "frank herbert"));
        assert!(!book.same_key("Dune", "Brian Herbert"));
    }

    #[test]
    fn adjust_stock_refuses_to_go_negative() {
        let mut book = Book::new("Dune", "Frank Herbert", 10.0, 2).unwrap();
        assert_eq!(book.adjust_stock(3).unwrap(), 5);
        assert!(book.adjust_stock(-6).is_err());
        assert_eq!(book.stock(), 5);
    }

    #[test]
    fn json_shape() {
        let book = Book::new("Dune", "Frank Herbert", 10.5, 2).unwrap();
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Dune", "author": "Frank Herbert", "price": 10.5, "stock": 2})
        );
        let bad = serde_json::json!({"title": "Dune", "author": "F", "price": -1.0, "stock": 2});
        assert!(serde_json::from_value::<Book>(bad).is_err());
    }
}
