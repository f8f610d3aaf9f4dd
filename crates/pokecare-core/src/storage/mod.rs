//! # Storage Module
//!
//! The local-storage contract and its backends.
//!
//! Values are opaque strings under string keys, exactly like the browser's
//! `localStorage`. Encoding lives in [`crate::formats`]; ownership of the
//! individual keys lives in [`crate::roster`].
//!
//! ## Backends
//!
//! - [`MemoryStore`]: `BTreeMap`-backed, volatile
//! - [`RedbStore`]: one redb table on disk, ACID per write

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::PetError;
use std::path::Path;

// =============================================================================
// ITEM STORE TRAIT
// =============================================================================

/// A string-keyed, string-valued item store.
///
/// Every `set_item` either lands completely or not at all.
pub trait ItemStore {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, PetError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), PetError>;

    /// All keys, in sorted order.
    fn keys(&self) -> Result<Vec<String>, PetError>;
}

impl<S: ItemStore + ?Sized> ItemStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, PetError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PetError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, PetError> {
        (**self).keys()
    }
}

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Storage backend chosen at runtime.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

impl StorageBackend {
    /// Open or create a persistent backend at `path`.
    pub fn open_redb(path: impl AsRef<Path>) -> Result<Self, PetError> {
        Ok(Self::Persistent(RedbStore::open(path)?))
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Persistent(_))
    }
}

impl ItemStore for StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, PetError> {
        match self {
            Self::InMemory(store) => store.get_item(key),
            Self::Persistent(store) => store.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError> {
        match self {
            Self::InMemory(store) => store.set_item(key, value),
            Self::Persistent(store) => store.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PetError> {
        match self {
            Self::InMemory(store) => store.remove_item(key),
            Self::Persistent(store) => store.remove_item(key),
        }
    }

    fn keys(&self) -> Result<Vec<String>, PetError> {
        match self {
            Self::InMemory(store) => store.keys(),
            Self::Persistent(store) => store.keys(),
        }
    }
}
