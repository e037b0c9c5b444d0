use super::DataStore;
use crate::error::PersistenceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A collection stored as a JSON array in a single file.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<(), PersistenceError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))
            }
            _ => Ok(()),
        }
    }
}

impl<T> DataStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<Vec<T>>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "data file missing");
                return Ok(None);
            }
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let records: Vec<T> = serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "rejecting data file");
            PersistenceError::corrupt(&self.path, e)
        })?;
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(Some(records))
    }

    fn save(&mut self, records: &[T]) -> Result<(), PersistenceError> {
        self.ensure_parent()?;
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| PersistenceError::corrupt(&self.path, e))?;
        fs::write(&self.path, content).map_err(|e| PersistenceError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
