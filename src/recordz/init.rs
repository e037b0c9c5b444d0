use crate::budget::BudgetTracker;
use crate::commands::CmdResult;
use crate::config::RecordzConfig;
use crate::error::Result;
use crate::inventory::InventoryManager;
use crate::model::{Book, Student, Transaction};
use crate::store::fs::JsonFileStore;
use crate::students::StudentManager;
use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "RECORDZ_HOME";

const FALLBACK_DIR: &str = ".recordz";

/// Where the data files live and how they are named.
pub struct RecordzContext {
    pub data_dir: PathBuf,
    pub config: RecordzConfig,
}

/// Picks the data directory: an explicit path, then `RECORDZ_HOME`, then the
/// platform data directory, then `./.recordz`.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    resolve_data_dir_from(explicit, std::env::var_os(HOME_ENV))
}

fn resolve_data_dir_from(explicit: Option<&Path>, env: Option<OsString>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Some(dir) = env.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("com", "recordz", "recordz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

pub fn initialize(explicit: Option<&Path>) -> Result<RecordzContext> {
    let data_dir = resolve_data_dir(explicit);
    let config = RecordzConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), "using data directory");
    Ok(RecordzContext { data_dir, config })
}

impl RecordzContext {
    pub fn students(&self) -> (StudentManager<JsonFileStore<Student>>, CmdResult<Student>) {
        StudentManager::open(JsonFileStore::new(self.config.students_path(&self.data_dir)))
    }

    pub fn inventory(&self) -> (InventoryManager<JsonFileStore<Book>>, CmdResult<Book>) {
        InventoryManager::open(JsonFileStore::new(self.config.books_path(&self.data_dir)))
    }

    /// Opens the budget with autosave on: every request runs in its own
    /// process, so an unsaved add would be lost on exit.
    pub fn budget(&self) -> (BudgetTracker<JsonFileStore<Transaction>>, CmdResult<Transaction>) {
        let store = JsonFileStore::new(self.config.transactions_path(&self.data_dir));
        let (tracker, result) = BudgetTracker::open(store);
        (tracker.with_autosave(true), result)
    }
}
