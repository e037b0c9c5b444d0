use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PersistenceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for recordz, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordzConfig {
    #[serde(default = "default_students_file")]
    pub students_file: String,

    #[serde(default = "default_books_file")]
    pub books_file: String,

    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,

    /// Symbol printed in front of money values
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_students_file() -> String {
    "students.json".to_string()
}

fn default_books_file() -> String {
    "books.json".to_string()
}

fn default_transactions_file() -> String {
    "transactions.json".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for RecordzConfig {
    fn default() -> Self {
        Self {
            students_file: default_students_file(),
            books_file: default_books_file(),
            transactions_file: default_transactions_file(),
            currency: default_currency(),
        }
    }
}

/// What the `config` command was asked to do.
#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

impl RecordzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| PersistenceError::io(&config_path, e))?;
        let config = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::corrupt(&config_path, e))?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| PersistenceError::io(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PersistenceError::corrupt(&config_path, e))?;
        fs::write(&config_path, content).map_err(|e| PersistenceError::io(&config_path, e))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "students-file" => Some(self.students_file.clone()),
            "books-file" => Some(self.books_file.clone()),
            "transactions-file" => Some(self.transactions_file.clone()),
            "currency" => Some(self.currency.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Value for {} cannot be empty", key));
        }
        match key {
            "students-file" => self.students_file = value.to_string(),
            "books-file" => self.books_file = value.to_string(),
            "transactions-file" => self.transactions_file = value.to_string(),
            "currency" => self.currency = value.to_string(),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(String, String)> {
        ["students-file", "books-file", "transactions-file", "currency"]
            .iter()
        .filter_map(|k| self.get(k).map(|v| (k.to_string(), v)))
        .collect()
    }

    pub fn students_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.students_file)
    }

    pub fn books_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.books_file)
    }

    pub fn transactions_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.transactions_file)
    }
}

/// Runs a config action against the config stored in `dir`. The key/value
/// pairs to show end up in `affected`.
pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult<(String, String)>> {
    match action {
        ConfigAction::ShowAll => {
            let config = RecordzConfig::load(dir)?;
            Ok(CmdResult::default().with_affected(config.list_all()))
        }
        ConfigAction::ShowKey(key) => {
            let config = RecordzConfig::load(dir)?;
            let result = CmdResult::default();
            Ok(match config.get(&key) {
                Some(value) => result.with_affected(vec![(key, value)]),
                None => result.with_message(CmdMessage::error(format!("Unknown config key: {}", key))),
            })
        }
        ConfigAction::Set(key, value) => {
            let mut config = RecordzConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e)));
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, display_val))))
        }
    }
}
