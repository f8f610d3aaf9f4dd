//! # Property-Based Tests
//!
//! Invariants of the care service under arbitrary action sequences.

use pokecare_core::{
    CareService, Command, CreatureId, CueLog, MemoryStore, RosterStore, Stage, Stat, TaskBoard,
    primitives::STAT_MAX,
};
use proptest::collection::vec;
use proptest::prelude::*;

fn command(kind: u8) -> Command {
    match kind % 4 {
        0 => Command::Feed {
            cue: "eat.mp3".to_string(),
        },
        1 => Command::UseStone {
            cue: "moonstone.mp3".to_string(),
        },
        2 => Command::UsePotion {
            cue: "potion.mp3".to_string(),
        },
        _ => Command::CheckEvolution,
    }
}

fn service() -> CareService<MemoryStore, TaskBoard, CueLog> {
    CareService::new(
        RosterStore::new(MemoryStore::new()),
        TaskBoard::new(),
        CueLog::new(),
    )
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Stats stay inside [0, 2500] whatever happens.
    #[test]
    fn stats_stay_in_range(
        steps in vec((0u8..4, 1u8..6), 1..120)
    ) {
        let mut service = service();

        for (kind, creature) in steps {
            let id = CreatureId::new(format!("p{creature}"));
            service.apply(&id, &command(kind));
        }

        for creature in service.creatures() {
            prop_assert!(creature.health.value() <= STAT_MAX);
            prop_assert!(creature.happiness.value() <= STAT_MAX);
        }
    }

    /// Stages never move backwards.
    #[test]
    fn stage_is_monotonic(kinds in vec(0u8..4, 1..200)) {
        let mut service = service();
        let id = CreatureId::new("p1");
        let mut last = Stage::Base;

        for kind in kinds {
            service.apply(&id, &command(kind));
            let stage = service.creature(&id).map(|c| c.stage()).unwrap_or(last);
            prop_assert!(stage >= last);
            last = stage;
        }
    }

    /// At most one form change per check.
    #[test]
    fn one_transition_per_check(health in 0i64..3000, happiness in 0i64..3000) {
        let mut service = service();
        let id = CreatureId::new("p1");
        let mut roster = service.store().load();
        if let Some(c) = roster.get_mut(&id) {
            c.health = Stat::new(health);
            c.happiness = Stat::new(happiness);
        }
        service.store_mut().save(&roster).expect("save");

        service.check_and_update(&id);
        let stage = service.creature(&id).map(|c| c.stage());
        prop_assert!(stage != Some(Stage::Third));
    }

    /// A stat action on a maxed creature changes nothing.
    #[test]
    fn maxed_creature_is_fixed_point(kind in 0u8..3) {
        let mut service = service();
        let id = CreatureId::new("p2");
        let mut roster = service.store().load();
        if let Some(c) = roster.get_mut(&id) {
            c.health = Stat::MAX;
            c.happiness = Stat::MAX;
        }
        service.store_mut().save(&roster).expect("save");

        service.apply(&id, &command(kind));
        let creature = service.creature(&id).expect("p2");
        prop_assert!(creature.is_maxed());
        prop_assert_eq!(service.cues().events().len(), 1);
    }

    /// Unknown ids leave the stored roster untouched.
    #[test]
    fn unknown_ids_are_noops(kinds in vec(0u8..4, 1..20)) {
        let mut service = service();
        let before = service.store().load();

        for kind in kinds {
            service.apply(&CreatureId::new("nobody"), &command(kind));
        }

        prop_assert_eq!(service.store().load(), before);
        prop_assert!(service.store().items().is_empty());
    }
}
