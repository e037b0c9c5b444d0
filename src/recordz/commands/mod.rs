//! Plumbing shared by the three managers: result and message types, record
//! selection, and the load/save helpers that turn storage failures into
//! user-facing messages.

use crate::error::{RecordzError, Result};
use std::fmt;
use std::str::FromStr;

pub mod persist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A record together with its 1-based position in the manager's collection.
#[derive(Debug, Clone)]
pub struct DisplayRecord<T> {
    pub index: usize,
    pub record: T,
}

/// What a manager operation did: records it touched, records it lists, and
/// messages for the user.
#[derive(Debug)]
pub struct CmdResult<T> {
    pub affected: Vec<T>,
    pub listed: Vec<DisplayRecord<T>>,
    pub messages: Vec<CmdMessage>,
}

impl<T> Default for CmdResult<T> {
    fn default() -> Self {
        Self {
            affected: Vec::new(),
            listed: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl<T> CmdResult<T> {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected(mut self, records: Vec<T>) -> Self {
        self.affected = records;
        self
    }

    pub fn with_listed(mut self, records: Vec<DisplayRecord<T>>) -> Self {
        self.listed = records;
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}

/// How a user points at one record: by its list number or by a search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Search(String),
}

impl FromStr for Selector {
    type Err = RecordzError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RecordzError::Api("Selector cannot be empty".into()));
        }
        match trimmed.parse::<usize>() {
            Ok(n) => Ok(Selector::Index(n)),
            Err(_) => Ok(Selector::Search(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(n) => write!(f, "#{}", n),
            Selector::Search(term) => write!(f, "\"{}\"", term),
        }
    }
}

/// Normalizes a user search term once, before it is matched against records.
pub fn search_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive substring match. `term` must come from [`search_term`].
pub fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// Returns clones of all records accepted by `matches`, in collection order.
pub fn search<T, F>(records: &[T], mut matches: F) -> Vec<DisplayRecord<T>>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r))
        .map(|(i, r)| DisplayRecord {
            index: i + 1,
            record: r.clone(),
        })
        .collect()
}

/// Resolves a selector to exactly one position in `records`.
///
/// A search term must match a single record; several matches yield
/// [`RecordzError::Ambiguous`] with the candidates labelled by list number.
/// A list number past the end is retried as a search for its digits, so a
/// numeric fragment such as a year still finds a record. `matches` receives
/// the term already normalized by [`search_term`].
pub fn resolve<T, M, L>(records: &[T], selector: &Selector, matches: M, label: L) -> Result<usize>
where
    M: Fn(&T, &str) -> bool,
    L: Fn(&T) -> String,
{
    let term = match selector {
        Selector::Index(n) if *n >= 1 && *n <= records.len() => return Ok(n - 1),
        Selector::Index(n) => n.to_string(),
        Selector::Search(term) => term.clone(),
    };
    let needle = search_term(&term);
    let hits: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, &needle))
        .map(|(i, _)| i)
        .collect();
    match hits.as_slice() {
        [] => Err(RecordzError::NotFound(selector.to_string())),
        [only] => Ok(*only),
        many => Err(RecordzError::Ambiguous {
            term,
            candidates: many
                .iter()
                .map(|&i| format!("{}. {}", i + 1, label(&records[i])))
                .collect(),
        }),
    }
}
