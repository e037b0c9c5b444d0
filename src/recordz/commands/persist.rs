use super::{CmdMessage, CmdResult};
use crate::error::{PersistenceError, Result};
use crate::store::DataStore;
use tracing::{info, warn};

/// Loads a whole collection, falling back to an empty one on any failure.
///
/// `noun` names the records in messages ("students", "books", ...).
pub fn load_collection<T, S>(store: &S, noun: &str) -> (Vec<T>, CmdMessage)
where
    S: DataStore<T>,
{
    let location = store.location();
    match store.load() {
        Ok(Some(records)) => {
            let message = CmdMessage::success(format!(
                "Loaded {} {} from '{}'",
                records.len(),
                noun,
                location
            ));
            (records, message)
        }
        Ok(None) => (
            Vec::new(),
            CmdMessage::warning(format!(
                "No {} file '{}' found. Starting with an empty list.",
                noun, location
            )),
        ),
        Err(e @ PersistenceError::Corrupt { .. }) => {
            warn!(%location, error = %e, "starting with an empty collection");
            (
                Vec::new(),
                CmdMessage::error(format!("{}. Starting with an empty list.", e)),
            )
        }
        Err(e) => {
            warn!(%location, error = %e, "starting with an empty collection");
            (
                Vec::new(),
                CmdMessage::error(format!("Error loading {}: {}", noun, e)),
            )
        }
    }
}

/// Writes the collection, propagating failure.
pub fn save_collection<T, S>(store: &mut S, records: &[T], noun: &str) -> Result<CmdMessage>
where
    S: DataStore<T>,
{
    store.save(records)?;
    info!(location = %store.location(), count = records.len(), "saved {}", noun);
    Ok(CmdMessage::success(format!(
        "Saved {} {} to '{}'",
        records.len(),
        noun,
        store.location()
    )))
}

/// Writes the collection after a mutation. A failed write is reported on
/// `result` rather than undoing the change that was already made in memory.
pub fn autosave<T, S, R>(store: &mut S, records: &[T], noun: &str, result: &mut CmdResult<R>)
where
    S: DataStore<T>,
{
    match save_collection(store, records, noun) {
        Ok(message) => result.add_message(message),
        Err(e) => result.add_message(CmdMessage::error(format!("Error saving {}: {}", noun, e))),
    }
}
