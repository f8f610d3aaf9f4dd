//! In-memory item store.

use super::ItemStore;
use crate::PetError;
use std::collections::BTreeMap;

/// Volatile item store backed by a `BTreeMap`.
///
/// Never fails. Used by tests and by the `memory` CLI backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PetError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PetError> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PetError> {
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new();
        store.set_item("pokemons", "[]").expect("set");
        store.set_item("pokemons", "[1]").expect("set");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_item("pokemons").expect("get").as_deref(), Some("[1]"));
    }

    #[test]
    fn remove_absent_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove_item("missing").is_ok());
        assert!(store.is_empty());
    }
}
