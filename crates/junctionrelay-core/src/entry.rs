// ── Config entries ──
//
// A config entry is what a successful setup produces and what the hub
// is built from. Storage is delegated to an `EntryStore`.

use serde::{Deserialize, Serialize};

use crate::host::Host;

/// Data persisted for one configured backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryData {
    pub host: Host,
}

/// A configured backend as stored by an [`EntryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Stable id, derived from the host slug.
    pub entry_id: String,
    pub title: String,
    #[serde(flatten)]
    pub data: EntryData,
}

impl ConfigEntry {
    pub fn new(title: impl Into<String>, data: EntryData) -> Self {
        Self {
            entry_id: data.host.slug(),
            title: title.into(),
            data,
        }
    }
}

/// Persistence for config entries.
///
/// Entries are never re-validated after they are stored.
pub trait EntryStore {
    type Error: std::error::Error;

    fn entries(&self) -> &[ConfigEntry];

    /// Store an entry, replacing any existing entry with the same id.
    ///
    /// Returns the replaced entry, if any.
    fn add(&mut self, entry: ConfigEntry) -> Result<Option<ConfigEntry>, Self::Error>;

    /// Remove an entry by id, returning it if it existed.
    fn remove(&mut self, entry_id: &str) -> Result<Option<ConfigEntry>, Self::Error>;

    fn get(&self, entry_id: &str) -> Option<&ConfigEntry> {
        self.entries().iter().find(|e| e.entry_id == entry_id)
    }
}
