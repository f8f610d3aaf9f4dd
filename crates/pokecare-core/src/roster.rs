//! # Roster Store
//!
//! Sole owner of the roster and override keys in local storage.
//!
//! `load` never fails: a missing, corrupt or unreadable roster falls back to
//! the seed roster, and a bad override table reads as empty. Mutating
//! callers use `try_load`, which reports backend read failures instead. Every read goes
//! back to the store so writes from another tab (or process) are picked up.
//! Writes return errors so the caller decides how loud to be.

use crate::formats;
use crate::primitives::{OVERRIDES_KEY, ROSTER_KEY, SELECTED_KEY};
use crate::seed::default_roster;
use crate::storage::ItemStore;
use crate::{Creature, CreatureId, PetError, Roster, VisualOverride};
use std::collections::BTreeMap;

// =============================================================================
// ERROR LOGGING HELPERS
// =============================================================================

/// Log a failure and convert the Result to an Option.
#[inline]
fn log_and_convert<T>(result: Result<T, PetError>, context: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(context, error = %e, "falling back");
            None
        }
    }
}

// =============================================================================
// ROSTER STORE
// =============================================================================

/// Roster persistence over an [`ItemStore`].
#[derive(Debug)]
pub struct RosterStore<S> {
    items: S,
    seed: Roster,
}

impl<S: ItemStore> RosterStore<S> {
    /// Create a store seeded with the built-in roster.
    #[must_use]
    pub fn new(items: S) -> Self {
        Self::with_seed(items, default_roster())
    }

    /// Create a store with a custom seed roster.
    #[must_use]
    pub fn with_seed(items: S, seed: Roster) -> Self {
        Self { items, seed }
    }

    /// The underlying item store.
    #[must_use]
    pub fn items(&self) -> &S {
        &self.items
    }

    /// The underlying item store, for keys this type does not own.
    pub fn items_mut(&mut self) -> &mut S {
        &mut self.items
    }

    /// Load the persisted roster, or the seed roster if none is usable.
    #[must_use]
    pub fn load(&self) -> Roster {
        log_and_convert(self.try_load(), "roster read").unwrap_or_else(|| self.seed.clone())
    }

    /// Load for a read-modify-write.
    ///
    /// Missing or corrupt data still yields the seed roster, but a backend
    /// read failure is returned so the caller does not write the seed over
    /// saved progress.
    pub fn try_load(&self) -> Result<Roster, PetError> {
        let Some(raw) = self.items.get_item(ROSTER_KEY)? else {
            tracing::debug!("no stored roster, using seed");
            return Ok(self.seed.clone());
        };

        Ok(log_and_convert(formats::roster_from_json(&raw), "roster decode")
            .unwrap_or_else(|| self.seed.clone()))
    }

    /// Every creature, freshly read.
    #[must_use]
    pub fn get_all(&self) -> Vec<Creature> {
        self.load().into_vec()
    }

    /// One creature, freshly read.
    #[must_use]
    pub fn get_by_id(&self, id: &CreatureId) -> Option<Creature> {
        self.load().get(id).cloned()
    }

    /// Persist the whole roster in a single write.
    pub fn save(&mut self, roster: &Roster) -> Result<(), PetError> {
        let raw = formats::roster_to_json(roster)?;
        self.items.set_item(ROSTER_KEY, &raw)?;
        tracing::debug!(creatures = roster.len(), "roster saved");
        Ok(())
    }

    /// Record a creature's current appearance in the override table.
    ///
    /// Other entries are kept as stored, even ones that do not decode. A
    /// backend read failure aborts the write.
    pub fn save_visual_override(&mut self, creature: &Creature) -> Result<(), PetError> {
        let mut table = self.try_raw_overrides()?;
        let record = VisualOverride::from(creature);
        table.insert(creature.id.0.clone(), formats::override_to_value(&record)?);

        let raw = formats::raw_overrides_to_json(&table)?;
        self.items.set_item(OVERRIDES_KEY, &raw)?;
        tracing::debug!(creature = %creature.id, name = %creature.name, "override saved");
        Ok(())
    }

    fn raw_overrides(&self) -> formats::RawOverrideTable {
        log_and_convert(self.try_raw_overrides(), "override read").unwrap_or_default()
    }

    fn try_raw_overrides(&self) -> Result<formats::RawOverrideTable, PetError> {
        let table = self
            .items
            .get_item(OVERRIDES_KEY)?
            .and_then(|raw| {
                log_and_convert(formats::raw_overrides_from_json(&raw), "override decode")
            })
            .unwrap_or_default();
        Ok(table)
    }

    /// Every decodable override record.
    #[must_use]
    pub fn visual_overrides(&self) -> BTreeMap<CreatureId, VisualOverride> {
        let (decoded, rejected) = formats::decode_overrides(self.raw_overrides());
        for (id, reason) in rejected {
            tracing::warn!(creature = %id, %reason, "skipping malformed override");
        }
        decoded
    }

    /// Restore name and avatar from the override table onto `roster`.
    ///
    /// Returns how many creatures changed.
    pub fn apply_overrides(&self, roster: &mut Roster) -> usize {
        let mut changed = 0;
        for (id, record) in self.visual_overrides() {
            let Some(creature) = roster.get_mut(&id) else {
                continue;
            };
            if creature.name != record.name || creature.avatar != record.avatar {
                creature.name = record.name;
                creature.avatar = record.avatar;
                changed += 1;
            }
        }
        changed
    }

    /// The last selected creature id, as written by the UI layer.
    #[must_use]
    pub fn selected_id(&self) -> Option<CreatureId> {
        let raw = log_and_convert(self.items.get_item(SELECTED_KEY), "selection read").flatten()?;
        log_and_convert(formats::selected_from_json(&raw), "selection decode")
    }

    /// Store the selected creature id on behalf of the UI layer.
    pub fn set_selected_id(&mut self, id: &CreatureId) -> Result<(), PetError> {
        let raw = formats::selected_to_json(id)?;
        self.items.set_item(SELECTED_KEY, &raw)
    }

    /// Forget the roster, overrides and selection.
    pub fn clear(&mut self) -> Result<(), PetError> {
        self.items.remove_item(ROSTER_KEY)?;
        self.items.remove_item(OVERRIDES_KEY)?;
        self.items.remove_item(SELECTED_KEY)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::{Stage, Stat};

    fn store() -> RosterStore<MemoryStore> {
        RosterStore::new(MemoryStore::new())
    }

    #[test]
    fn load_without_data_returns_seed() {
        let store = store();
        assert_eq!(store.load(), default_roster());
    }

    #[test]
    fn load_with_corrupt_data_returns_seed() {
        let mut store = store();
        store
            .items_mut()
            .set_item(ROSTER_KEY, "[{\"broken\"")
            .expect("set");
        assert_eq!(store.load(), default_roster());
    }

    #[test]
    fn save_then_load_is_equal() {
        let mut store = store();
        let mut roster = store.load();
        if let Some(first) = roster.get_mut(&CreatureId::new("p1")) {
            first.health = Stat::new(900);
            first.happiness = Stat::new(850);
        }

        store.save(&roster).expect("save");
        assert_eq!(store.load(), roster);
    }

    #[test]
    fn reads_pick_up_external_writes() {
        let mut store = store();
        store.save(&store.load()).expect("save");

        let mut external = store.load();
        if let Some(c) = external.get_mut(&CreatureId::new("p2")) {
            c.name = "Renamed".to_string();
        }
        let raw = formats::roster_to_json(&external).expect("encode");
        store.items_mut().set_item(ROSTER_KEY, &raw).expect("set");

        let fresh = store.get_by_id(&CreatureId::new("p2")).expect("p2");
        assert_eq!(fresh.name, "Renamed");
    }

    #[test]
    fn get_by_unknown_id_is_none() {
        assert!(store().get_by_id(&CreatureId::new("missing")).is_none());
    }

    #[test]
    fn override_table_accumulates_entries() {
        let mut store = store();
        let roster = store.load();
        for creature in roster.iter().take(2) {
            store.save_visual_override(creature).expect("save override");
        }

        let overrides = store.visual_overrides();
        assert_eq!(overrides.len(), 2);
        assert!(overrides.contains_key(&CreatureId::new("p1")));
        assert!(overrides.contains_key(&CreatureId::new("p2")));
    }

    #[test]
    fn corrupt_override_table_is_replaced_on_write() {
        let mut store = store();
        store
            .items_mut()
            .set_item(OVERRIDES_KEY, "not json")
            .expect("set");
        assert!(store.visual_overrides().is_empty());

        let creature = store.get_by_id(&CreatureId::new("p3")).expect("p3");
        store.save_visual_override(&creature).expect("save override");
        assert_eq!(store.visual_overrides().len(), 1);
    }

    #[test]
    fn overrides_restore_evolved_look_after_reseed() {
        let mut store = store();
        let mut evolved = store.get_by_id(&CreatureId::new("p1")).expect("p1");
        let target = evolved.target(Stage::Second).expect("target");
        evolved.adopt(Stage::Second, target);
        store.save_visual_override(&evolved).expect("save override");

        let mut reseeded = default_roster();
        assert_eq!(store.apply_overrides(&mut reseeded), 1);
        let restored = reseeded.get(&CreatureId::new("p1")).expect("p1");
        assert_eq!(restored.name, "Ivysaur");
        assert_eq!(restored.avatar, "assets/avatars/ivysaur.png");

        // Second application is a no-op.
        assert_eq!(store.apply_overrides(&mut reseeded), 0);
    }

    #[test]
    fn selection_roundtrip_and_clear() {
        let mut store = store();
        assert!(store.selected_id().is_none());

        store.set_selected_id(&CreatureId::new("p4")).expect("select");
        assert_eq!(store.selected_id(), Some(CreatureId::new("p4")));

        store.save(&store.load()).expect("save");
        store.clear().expect("clear");
        assert!(store.selected_id().is_none());
        assert!(store.items().is_empty());
    }

    /// Reads always fail; writes land in the inner store.
    struct Unreadable(MemoryStore);

    impl ItemStore for Unreadable {
        fn get_item(&self, _key: &str) -> Result<Option<String>, PetError> {
            Err(PetError::Storage("disk unavailable".to_string()))
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError> {
            self.0.set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), PetError> {
            self.0.remove_item(key)
        }

        fn keys(&self) -> Result<Vec<String>, PetError> {
            self.0.keys()
        }
    }

    #[test]
    fn read_failure_is_seed_for_load_but_error_for_try_load() {
        let store = RosterStore::new(Unreadable(MemoryStore::new()));
        assert_eq!(store.load(), default_roster());
        assert!(matches!(store.try_load(), Err(PetError::Storage(_))));
    }

    #[test]
    fn override_write_aborts_when_table_unreadable() {
        let mut store = RosterStore::new(Unreadable(MemoryStore::new()));
        let creature = default_roster().into_vec().remove(0);

        assert!(store.save_visual_override(&creature).is_err());
        assert!(store.items().0.is_empty());
    }
}
