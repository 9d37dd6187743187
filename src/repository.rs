//! Keyed in-memory record store.
//!
//! Storage order carries no meaning at this layer; external ordering is
//! always an explicit sort by the owning service.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Records stored in a [`Repository`] expose their pre-populated id.
pub trait RecordId {
    fn record_id(&self) -> &str;
}

/// In-memory keyed store of domain records.
///
/// Single-writer, single-reader within one process; the mutex exists only to
/// allow shared references across async call sites, not for cross-thread
/// contention.
pub struct Repository<T> {
    records: Mutex<HashMap<String, T>>,
}

impl<T> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: RecordId + Clone> Repository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own id and hand it back.
    ///
    /// The id must be pre-populated and unique; inserting a duplicate id is
    /// a caller error.
    pub fn create(&self, record: T) -> Result<T> {
        let mut records = self.records.lock().unwrap();
        let id = record.record_id().to_string();
        if records.contains_key(&id) {
            return Err(Error::validation(format!("Duplicate record id: {id}")));
        }
        records.insert(id, record.clone());
        Ok(record)
    }

    pub fn find(&self, id: &str) -> Option<T> {
        let records = self.records.lock().unwrap();
        records.get(id).cloned()
    }

    /// All current records, order unspecified.
    pub fn list(&self) -> Vec<T> {
        let records = self.records.lock().unwrap();
        records.values().cloned().collect()
    }

    /// All current record ids, order unspecified.
    pub fn ids(&self) -> Vec<String> {
        let records = self.records.lock().unwrap();
        records.keys().cloned().collect()
    }

    /// Mutate a stored record in place.
    ///
    /// The rewrite pass calls this with ids obtained from [`Repository::ids`]
    /// on the same single-writer store, so a miss here is an internal
    /// consistency failure, not a caller-visible NotFound.
    pub fn modify(&self, id: &str, f: impl FnOnce(&mut T)) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(id)
            .ok_or_else(|| Error::internal(format!("Record {id} vanished between list and find")))?;
        f(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
