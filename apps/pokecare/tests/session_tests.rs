//! # Session Tests
//!
//! Selection, navigation and task bookkeeping over an in-memory store.

use pokecare::{CareAction, Config, PetSession};
use pokecare_core::{
    CreatureId, CueEvent, CueLog, ItemStore, MemoryStore, PetError, RosterStore, Stage, Stat,
    VisualOverride,
    primitives::{OVERRIDES_KEY, ROSTER_KEY, SELECTED_KEY, TASKS_KEY},
};
use std::cell::Cell;

type Session = PetSession<MemoryStore, CueLog>;

fn id(raw: &str) -> CreatureId {
    CreatureId::new(raw)
}

fn open(items: MemoryStore) -> Session {
    PetSession::open(items, CueLog::new(), &Config::default())
}

fn set_stats(items: &mut MemoryStore, raw: &str, health: i64, happiness: i64) {
    let mut store = RosterStore::new(&mut *items);
    let mut roster = store.load();
    let creature = roster.get_mut(&id(raw)).expect("known creature");
    creature.health = Stat::new(health);
    creature.happiness = Stat::new(happiness);
    store.save(&roster).expect("save");
}

// =============================================================================
// STARTUP
// =============================================================================

#[test]
fn fresh_start_selects_first_creature() {
    let session = open(MemoryStore::new());
    assert_eq!(session.selected(), Some(&id("p1")));
    assert!(session.cues().events().is_empty());
}

#[test]
fn saved_selection_is_restored() {
    let mut items = MemoryStore::new();
    items.set_item(SELECTED_KEY, "\"p3\"").expect("set");

    let session = open(items);
    assert_eq!(session.selected(), Some(&id("p3")));
}

#[test]
fn stale_selection_falls_back_to_first() {
    let mut items = MemoryStore::new();
    items.set_item(SELECTED_KEY, "\"missing\"").expect("set");

    let session = open(items);
    assert_eq!(session.selected(), Some(&id("p1")));
}

#[test]
fn stored_overrides_are_applied_on_open() {
    let mut items = MemoryStore::new();
    let record = VisualOverride {
        name: "Ivysaur".to_string(),
        avatar: "assets/avatars/ivysaur.png".to_string(),
        gif: "assets/gifs/ivysaur.gif".to_string(),
        energy: 100,
        attack: 62,
        defense: 63,
    };
    let table = serde_json::json!({ "p1": record });
    items
        .set_item(OVERRIDES_KEY, &table.to_string())
        .expect("set");

    let session = open(items);
    let creature = session.selected_creature().expect("p1");
    assert_eq!(creature.name, "Ivysaur");
    assert_eq!(creature.avatar, "assets/avatars/ivysaur.png");
}

/// Fails the first roster read, then behaves like the inner store.
struct RosterReadFailsOnce {
    inner: MemoryStore,
    failed: Cell<bool>,
}

impl ItemStore for RosterReadFailsOnce {
    fn get_item(&self, key: &str) -> Result<Option<String>, PetError> {
        if key == ROSTER_KEY && !self.failed.replace(true) {
            return Err(PetError::Storage("busy".to_string()));
        }
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PetError> {
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PetError> {
        self.inner.remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, PetError> {
        self.inner.keys()
    }
}

#[test]
fn unreadable_roster_on_open_is_not_overwritten() {
    let mut items = MemoryStore::new();
    set_stats(&mut items, "p2", 2000, 2000);
    let record = serde_json::json!({ "p2": { "name": "Charmeleon", "avatar": "c2.png" } });
    items
        .set_item(OVERRIDES_KEY, &record.to_string())
        .expect("set");
    items.set_item(SELECTED_KEY, "\"p2\"").expect("set");
    let before = items.get_item(ROSTER_KEY).expect("get");

    let session = PetSession::open(
        RosterReadFailsOnce {
            inner: items,
            failed: Cell::new(false),
        },
        CueLog::new(),
        &Config::default(),
    );

    assert_eq!(session.selected(), Some(&id("p2")));
    let after = session
        .service()
        .store()
        .items()
        .get_item(ROSTER_KEY)
        .expect("get");
    assert_eq!(after, before);

    let p2 = session.resolve(Some(&id("p2"))).expect("p2");
    assert_eq!(p2.health.value(), 2000);
    assert_eq!(p2.name, "Charmander");
}

// =============================================================================
// SELECTION AND NAVIGATION
// =============================================================================

#[test]
fn select_plays_cue_and_persists() {
    let mut session = open(MemoryStore::new());
    session.select(&id("p4")).expect("select");

    assert_eq!(session.selected(), Some(&id("p4")));
    assert_eq!(session.cues().count("sword-sound.mp3"), 1);

    let stored = session
        .service()
        .store()
        .selected_id()
        .expect("stored selection");
    assert_eq!(stored, id("p4"));
}

#[test]
fn select_unknown_is_an_error() {
    let mut session = open(MemoryStore::new());
    let result = session.select(&id("nobody"));

    assert!(matches!(result, Err(PetError::CreatureNotFound(_))));
    assert_eq!(session.selected(), Some(&id("p1")));
    assert!(session.cues().events().is_empty());
}

#[test]
fn next_wraps_to_first() {
    let mut session = open(MemoryStore::new());
    session.select(&id("p5")).expect("select");
    session.select_next().expect("next");
    assert_eq!(session.selected(), Some(&id("p1")));
}

#[test]
fn previous_wraps_to_last() {
    let mut session = open(MemoryStore::new());
    session.select_previous().expect("prev");
    assert_eq!(session.selected(), Some(&id("p5")));
}

#[test]
fn selecting_runs_the_evolution_check() {
    let mut items = MemoryStore::new();
    set_stats(&mut items, "p2", 1500, 1500);
    let mut session = open(items);

    let outcome = session.select(&id("p2")).expect("select");
    assert!(outcome.has_evolved);
    assert_eq!(session.selected_creature().expect("p2").name, "Charmeleon");

    let kinds: Vec<_> = session
        .cues()
        .events()
        .iter()
        .map(|e| matches!(e, CueEvent::Evolution(_)))
        .collect();
    assert_eq!(kinds, vec![true, false]);
}

// =============================================================================
// CARE
// =============================================================================

#[test]
fn care_defaults_to_selection() {
    let mut session = open(MemoryStore::new());
    session.select(&id("p3")).expect("select");

    let report = session.care(None, CareAction::Potion).expect("care");
    assert!(report.applied);
    assert!(!report.evolution.has_evolved);

    let creature = session.selected_creature().expect("p3");
    assert_eq!(creature.health.value(), 100);
    assert_eq!(creature.happiness.value(), 0);
}

#[test]
fn stone_can_trigger_evolution() {
    let mut items = MemoryStore::new();
    set_stats(&mut items, "p5", 900, 900);
    let mut session = open(items);

    let report = session
        .care(Some(&id("p5")), CareAction::Stone)
        .expect("care");
    assert!(report.evolution.has_evolved);
    assert_eq!(report.evolution.attack, 50);
}

// =============================================================================
// TASKS
// =============================================================================

#[test]
fn task_blocks_until_done_and_survives_reopen() {
    let mut items = MemoryStore::new();
    set_stats(&mut items, "p1", 1500, 1500);
    let mut session = open(items);

    let task = session
        .add_task(Some(&id("p1")), None, "Homework")
        .expect("add");
    assert_eq!(session.tasks()[0].stage, Stage::Base);
    assert!(!session.check(Some(&id("p1"))).expect("check").has_evolved);

    // Capped at 1000 while pending; the window needs more than that.
    let creature = session.selected_creature().expect("p1");
    assert_eq!(creature.health.value(), 1000);

    let raw = session
        .service()
        .store()
        .items()
        .get_item(TASKS_KEY)
        .expect("get");
    assert!(raw.is_some());

    let done = session.complete_task(task).expect("complete");
    assert_eq!(done.map(|t| t.title), Some("Homework".to_string()));
    assert!(session.tasks().is_empty());
}

#[test]
fn completing_unknown_task_is_none() {
    let mut session = open(MemoryStore::new());
    assert!(session.complete_task(42).expect("complete").is_none());
}

#[test]
fn reset_restores_the_seed() {
    let mut session = open(MemoryStore::new());
    session.select(&id("p2")).expect("select");
    session.care(None, CareAction::Feed).expect("care");
    session
        .add_task(None, Some(Stage::Second), "Gym")
        .expect("add");

    session.reset().expect("reset");

    assert_eq!(session.selected(), Some(&id("p1")));
    assert!(session.tasks().is_empty());
    let p2 = session.resolve(Some(&id("p2"))).expect("p2");
    assert_eq!(p2.health.value(), 0);
}
