//! # redb-backed Item Storage
//!
//! A disk-backed item store using the redb embedded database.
//!
//! One table maps keys to values, which gives the CLI a local-storage file
//! with:
//! - ACID transactions (a `set_item` is never half-applied)
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration

use super::ItemStore;
use crate::PetError;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;

/// Table for items: key -> value
const ITEMS: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

fn storage_error(e: impl std::fmt::Display) -> PetError {
    PetError::Storage(e.to_string())
}

/// A disk-backed item store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PetError> {
        let db = Database::create(path.as_ref()).map_err(storage_error)?;

        // Create the table up front so read transactions can always open it.
        {
            let write_txn = db.begin_write().map_err(storage_error)?;
            let _ = write_txn.open_table(ITEMS).map_err(storage_error)?;
            write_txn.commit().map_err(storage_error)?;
        }

        Ok(Self { db })
    }
}

impl ItemStore for RedbStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PetError> {
        let read_txn = self.db.begin_read().map_err(storage_error)?;
        let table = read_txn.open_table(ITEMS).map_err(storage_error)?;
        let value = table
            .get(key)
            .map_err(storage_error)?
            .map(|v| v.value().to_string());
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError> {
        let write_txn = self.db.begin_write().map_err(storage_error)?;
        {
            let mut table = write_txn.open_table(ITEMS).map_err(storage_error)?;
            table.insert(key, value).map_err(storage_error)?;
        }
        write_txn.commit().map_err(storage_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PetError> {
        let write_txn = self.db.begin_write().map_err(storage_error)?;
        {
            let mut table = write_txn.open_table(ITEMS).map_err(storage_error)?;
            table.remove(key).map_err(storage_error)?;
        }
        write_txn.commit().map_err(storage_error)
    }

    fn keys(&self) -> Result<Vec<String>, PetError> {
        let read_txn = self.db.begin_read().map_err(storage_error)?;
        let table = read_txn.open_table(ITEMS).map_err(storage_error)?;

        let mut keys = Vec::new();
        for entry in table.iter().map_err(storage_error)? {
            let (key, _) = entry.map_err(storage_error)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("care.db");

        {
            let mut store = RedbStore::open(&path).expect("open");
            store.set_item("selectedPokemonId", "\"p1\"").expect("set");
        }

        let store = RedbStore::open(&path).expect("reopen");
        assert_eq!(
            store.get_item("selectedPokemonId").expect("get").as_deref(),
            Some("\"p1\"")
        );
        assert_eq!(store.keys().expect("keys"), vec!["selectedPokemonId".to_string()]);
    }

    #[test]
    fn keys_are_sorted_and_remove_works() {
        let dir = tempdir().expect("tempdir");
        let mut store = RedbStore::open(dir.path().join("care.db")).expect("open");

        store.set_item("pokemons", "[]").expect("set");
        store.set_item("evolvedPokemonStates", "{}").expect("set");
        assert_eq!(
            store.keys().expect("keys"),
            vec!["evolvedPokemonStates".to_string(), "pokemons".to_string()]
        );

        store.remove_item("pokemons").expect("remove");
        store.remove_item("pokemons").expect("remove twice");
        assert_eq!(store.get_item("pokemons").expect("get"), None);
    }
}
