use super::DataStore;
use crate::error::PersistenceError;

/// In-memory storage for testing. Does NOT persist data.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    snapshot: Option<Vec<T>>,
    corrupt: bool,
    saves: usize,
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            snapshot: None,
            corrupt: false,
            saves: 0,
        }
    }
}

impl<T: Clone> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `records`, as if a file existed.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            snapshot: Some(records),
            ..Self::default()
        }
    }

    /// A store whose contents fail to parse.
    pub fn corrupted() -> Self {
        Self {
            corrupt: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Option<&[T]> {
        self.snapshot.as_deref()
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl<T: Clone> DataStore<T> for InMemoryStore<T> {
    fn load(&self) -> Result<Option<Vec<T>>, PersistenceError> {
        if self.corrupt {
            return Err(PersistenceError::corrupt("memory", "simulated corruption"));
        }
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, records: &[T]) -> Result<(), PersistenceError> {
        self.snapshot = Some(records.to_vec());
        self.corrupt = false;
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
