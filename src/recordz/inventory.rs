//! Bookstore inventory.
//!
//! A book is identified by its (title, author) pair, compared ignoring case.
//! Every successful mutation is saved immediately.

use crate::commands::persist::{autosave, load_collection, save_collection};
use crate::commands::{contains_term, resolve, search, search_term, CmdMessage, CmdResult, Selector};
use crate::error::{RecordzError, Result};
use crate::model::Book;
use crate::store::DataStore;
use crate::validation::sum_money;
use tracing::debug;
use uuid::Uuid;

const NOUN: &str = "books";

/// Requested changes to a book. Blank text and `None` mean "keep".
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

pub struct InventoryManager<S: DataStore<Book>> {
    store: S,
    books: Vec<Book>,
}

impl<S: DataStore<Book>> InventoryManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            books: Vec::new(),
        }
    }

    pub fn open(store: S) -> (Self, CmdResult<Book>) {
        let mut manager = Self::new(store);
        let result = manager.load();
        (manager, result)
    }

    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> CmdResult<Book> {
        CmdResult::default().with_listed(search(&self.books, |_| true))
    }

    pub fn add(&mut self, title: &str, author: &str, price: f64, stock: i64) -> Result<CmdResult<Book>> {
        let book = Book::new(title, author, price, stock)?;
        if self.key_taken(book.title(), book.author(), None) {
            return Err(duplicate(book.title(), book.author()));
        }

        debug!(title = book.title(), author = book.author(), "adding book");
        self.books.push(book.clone());
        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Book '{}' added successfully.",
            book.title()
        )));
        autosave(&mut self.store, &self.books, NOUN, &mut result);
        Ok(result.with_affected(vec![book]))
    }

    /// Case-insensitive substring search on title or author.
    pub fn find(&self, term: &str) -> CmdResult<Book> {
        let term = search_term(term);
        CmdResult::default().with_listed(search(&self.books, |b| matches_book(b, &term)))
    }

    pub fn get(&self, selector: &Selector) -> Result<&Book> {
        Ok(&self.books[self.position(selector)?])
    }

    /// Applies every supplied field or none of them.
    pub fn update(&mut self, selector: &Selector, update: &BookUpdate) -> Result<CmdResult<Book>> {
        let pos = self.position(selector)?;
        let original = self.books[pos].clone();
        let mut updated = original.clone();

        if let Some(title) = non_blank(&update.title) {
            updated.set_title(title)?;
        }
        if let Some(author) = non_blank(&update.author) {
            updated.set_author(author)?;
        }
        if let Some(price) = update.price {
            updated.set_price(price)?;
        }
        if let Some(stock) = update.stock {
            updated.set_stock(stock)?;
        }

        if self.key_taken(updated.title(), updated.author(), Some(updated.id())) {
            return Err(duplicate(updated.title(), updated.author()));
        }

        let changed = updated.title() != original.title()
            || updated.author() != original.author()
            || updated.price() != original.price()
            || updated.stock() != original.stock();
        if !changed {
            return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
                "No changes applied to '{}'.",
                original.title()
            ))));
        }

        self.books[pos] = updated.clone();
        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Book '{}' updated successfully.",
            updated.title()
        )));
        autosave(&mut self.store, &self.books, NOUN, &mut result);
        Ok(result.with_affected(vec![updated]))
    }

    pub fn delete(&mut self, selector: &Selector) -> Result<CmdResult<Book>> {
        let pos = self.position(selector)?;
        let id = self.books[pos].id();
        self.delete_by_id(id)
    }

    pub fn delete_by_id(&mut self, id: Uuid) -> Result<CmdResult<Book>> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| RecordzError::NotFound(id.to_string()))?;
        let removed = self.books.remove(pos);

        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Book '{}' by {} deleted successfully.",
            removed.title(),
            removed.author()
        )));
        autosave(&mut self.store, &self.books, NOUN, &mut result);
        Ok(result.with_affected(vec![removed]))
    }

    /// Adds `delta` (which may be negative) to a book's stock.
    pub fn adjust_stock(&mut self, selector: &Selector, delta: i64) -> Result<CmdResult<Book>> {
        let pos = self.position(selector)?;
        let stock = self.books[pos].adjust_stock(delta)?;
        let book = self.books[pos].clone();

        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Stock for '{}' adjusted. New stock: {}",
            book.title(),
            stock
        )));
        autosave(&mut self.store, &self.books, NOUN, &mut result);
        Ok(result.with_affected(vec![book]))
    }

    /// Sum of price times stock across the inventory.
    pub fn total_value(&self) -> Result<f64> {
        let total = sum_money(
            "Total inventory value",
            self.books.iter().map(|b| b.price() * f64::from(b.stock())),
        )?;
        Ok(total)
    }

    pub fn save(&mut self) -> Result<CmdResult<Book>> {
        let message = save_collection(&mut self.store, &self.books, NOUN)?;
        Ok(CmdResult::default().with_message(message))
    }

    pub fn load(&mut self) -> CmdResult<Book> {
        let (books, message) = load_collection(&self.store, NOUN);
        self.books = books;
        CmdResult::default().with_message(message)
    }

    fn key_taken(&self, title: &str, author: &str, except: Option<Uuid>) -> bool {
        self.books
            .iter()
            .filter(|b| Some(b.id()) != except)
            .any(|b| b.same_key(title, author))
    }

    fn position(&self, selector: &Selector) -> Result<usize> {
        resolve(&self.books, selector, matches_book, |b| {
            format!("{} by {}", b.title(), b.author())
        })
    }
}

fn matches_book(book: &Book, term: &str) -> bool {
    contains_term(book.title(), term) || contains_term(book.author(), term)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn duplicate(title: &str, author: &str) -> RecordzError {
    RecordzError::Duplicate(format!("Book '{}' by {}", title, author))
}
