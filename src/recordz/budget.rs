//! Budget transactions.
//!
//! Transactions have no uniqueness key. The collection is kept sorted by date
//! (oldest first, stable for equal dates) after every add, delete and load.
//! Adding a transaction only changes memory unless autosave is enabled; deletes
//! are always saved.

use crate::commands::persist::{autosave, load_collection, save_collection};
use crate::commands::{contains_term, resolve, search, search_term, CmdMessage, CmdResult, Selector};
use crate::error::{RecordzError, Result};
use crate::model::Transaction;
use crate::store::DataStore;
use crate::validation::sum_money;
use std::collections::BTreeMap;
use uuid::Uuid;

const NOUN: &str = "transactions";

/// Income, expenses and their difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// All transactions of one category and their total.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: &'static str,
    pub total: f64,
    pub transactions: Vec<Transaction>,
}

pub struct BudgetTracker<S: DataStore<Transaction>> {
    store: S,
    transactions: Vec<Transaction>,
    autosave: bool,
}

impl<S: DataStore<Transaction>> BudgetTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            transactions: Vec::new(),
            autosave: false,
        }
    }

    /// Save after every add as well as after deletes.
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn open(store: S) -> (Self, CmdResult<Transaction>) {
        let mut tracker = Self::new(store);
        let result = tracker.load();
        (tracker, result)
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self) -> CmdResult<Transaction> {
        CmdResult::default().with_listed(search(&self.transactions, |_| true))
    }

    pub fn add(&mut self, date: &str, category: &str, amount: f64) -> Result<CmdResult<Transaction>> {
        let transaction = Transaction::new(date, category, amount)?;
        self.transactions.push(transaction.clone());
        self.sort();

        let mut result = CmdResult::default()
            .with_message(CmdMessage::success("Transaction added successfully."));
        if self.autosave {
            autosave(&mut self.store, &self.transactions, NOUN, &mut result);
        }
        Ok(result.with_affected(vec![transaction]))
    }

    /// Case-insensitive substring search on category or `YYYY-MM-DD` date.
    pub fn find(&self, term: &str) -> CmdResult<Transaction> {
        let term = search_term(term);
        CmdResult::default().with_listed(search(&self.transactions, |t| matches_transaction(t, &term)))
    }

    pub fn delete(&mut self, selector: &Selector) -> Result<CmdResult<Transaction>> {
        let pos = resolve(&self.transactions, selector, matches_transaction, |t| {
            format!("{} {} {:.2}", t.date_string(), t.category(), t.amount())
        })?;
        let id = self.transactions[pos].id();
        self.delete_by_id(id)
    }

    pub fn delete_by_id(&mut self, id: Uuid) -> Result<CmdResult<Transaction>> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| RecordzError::NotFound(id.to_string()))?;
        let removed = self.transactions.remove(pos);

        let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
            "Transaction {} {} {:.2} deleted successfully.",
            removed.date_string(),
            removed.category(),
            removed.amount()
        )));
        autosave(&mut self.store, &self.transactions, NOUN, &mut result);
        Ok(result.with_affected(vec![removed]))
    }

    pub fn summary(&self) -> Result<BudgetSummary> {
        let (income, expenses): (Vec<&Transaction>, Vec<&Transaction>) =
            self.transactions.iter().partition(|t| t.is_income());
        let income = sum_money("Income", income.iter().map(|t| t.amount()))?;
        let expenses = sum_money("Expenses", expenses.iter().map(|t| t.amount()))?;
        Ok(BudgetSummary {
            income,
            expenses,
            net: sum_money("Balance", [income, -expenses])?,
        })
    }

    /// Transactions grouped per category, categories in alphabetical order.
    pub fn by_category(&self) -> Result<Vec<CategoryGroup>> {
        let mut groups: BTreeMap<&'static str, Vec<Transaction>> = BTreeMap::new();
        for t in &self.transactions {
            groups.entry(t.category()).or_default().push(t.clone());
        }
        groups
            .into_iter()
            .map(|(category, transactions)| -> Result<CategoryGroup> {
                let total = sum_money("Category total", transactions.iter().map(Transaction::amount))?;
                Ok(CategoryGroup {
                    category,
                    total,
                    transactions,
                })
            })
            .collect()
    }

    pub fn save(&mut self) -> Result<CmdResult<Transaction>> {
        let message = save_collection(&mut self.store, &self.transactions, NOUN)?;
        Ok(CmdResult::default().with_message(message))
    }

    pub fn load(&mut self) -> CmdResult<Transaction> {
        let (transactions, message) = load_collection(&self.store, NOUN);
        self.transactions = transactions;
        self.sort();
        CmdResult::default().with_message(message)
    }

    fn sort(&mut self) {
        self.transactions.sort_by_key(Transaction::date);
    }
}

fn matches_transaction(t: &Transaction, term: &str) -> bool {
    contains_term(t.category(), term) || contains_term(&t.date_string(), term)
}
