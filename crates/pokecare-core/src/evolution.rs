//! # Evolution Rules
//!
//! The pure half of the evolution state machine: given a creature and
//! whether its tasks are clear, decide the stat cap, the transition (if any)
//! and whether the creature counts as fully evolved.
//!
//! Nothing here touches storage or cues; [`crate::service::CareService`]
//! sequences these steps with persistence.
//!
//! ## Cap Table
//!
//! | Stage | Tasks pending | Tasks clear |
//! |-------|---------------|-------------|
//! | Base | 1000 | 2000, only while both stats < 2000 |
//! | Second | 2000 | 2500 |
//! | Third | 2500 | none |
//!
//! The base/clear rule can never lower anything: it only applies when both
//! stats are already below 2000. Stats that reached 2000 at the base stage
//! stay where they are.
//!
//! ## Transitions
//!
//! At most one per call; the first evolution is checked first.

use crate::primitives::{
    BASE_PENDING_CAP, FIRST_EVOLUTION_HIGH, FIRST_EVOLUTION_LOW, SECOND_EVOLUTION_FLOOR,
    SECOND_STAGE_CAP, STAT_MAX,
};
use crate::{Creature, FormTarget, Stage};

// =============================================================================
// CAPS
// =============================================================================

/// Cap for both stats at `stage`, or `None` when no rule applies.
#[must_use]
pub fn stage_cap(creature: &Creature, tasks_pending: bool) -> Option<u32> {
    let health = creature.health.value();
    let happiness = creature.happiness.value();

    match (creature.stage(), tasks_pending) {
        (Stage::Base, true) => Some(BASE_PENDING_CAP),
        (Stage::Base, false) if health < SECOND_STAGE_CAP && happiness < SECOND_STAGE_CAP => {
            Some(SECOND_STAGE_CAP)
        }
        (Stage::Base, false) => None,
        (Stage::Second, true) => Some(SECOND_STAGE_CAP),
        (Stage::Second, false) | (Stage::Third, true) => Some(STAT_MAX),
        (Stage::Third, false) => None,
    }
}

/// Apply the stage cap in place. Returns the cap that was applied.
pub fn apply_cap(creature: &mut Creature, tasks_pending: bool) -> Option<u32> {
    let cap = stage_cap(creature, tasks_pending)?;
    creature.health = creature.health.capped(cap);
    creature.happiness = creature.happiness.capped(cap);
    Some(cap)
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// A form change the creature qualifies for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Base -> Second.
    First(FormTarget),
    /// Second -> Third.
    Second(FormTarget),
}

impl Transition {
    /// The stage entered.
    #[must_use]
    pub fn to_stage(&self) -> Stage {
        match self {
            Transition::First(_) => Stage::Second,
            Transition::Second(_) => Stage::Third,
        }
    }
}

fn in_first_window(value: u32) -> bool {
    value > FIRST_EVOLUTION_LOW && value < FIRST_EVOLUTION_HIGH
}

/// Decide which transition fires, if any.
///
/// Call after [`apply_cap`].
#[must_use]
pub fn next_transition(creature: &Creature, tasks_pending: bool) -> Option<Transition> {
    if tasks_pending {
        return None;
    }

    let health = creature.health.value();
    let happiness = creature.happiness.value();

    if !creature.evolution_sound_played
        && in_first_window(health)
        && in_first_window(happiness)
        && creature.stage() == Stage::Base
    {
        if let Some(target) = creature.target(Stage::Second) {
            return Some(Transition::First(target));
        }
    }

    if creature.evolution_sound_played
        && health >= SECOND_EVOLUTION_FLOOR
        && happiness >= SECOND_EVOLUTION_FLOOR
        && creature.stage() == Stage::Second
    {
        if let Some(target) = creature.target(Stage::Third) {
            return Some(Transition::Second(target));
        }
    }

    None
}

/// Apply a transition. Returns the adopted `(attack, defense)`.
///
/// The first evolution marks `evolution_sound_played`; the second clears it
/// again.
pub fn evolve(creature: &mut Creature, transition: Transition) -> (u32, u32) {
    match transition {
        Transition::First(target) => {
            let stats = creature.adopt(Stage::Second, target);
            creature.evolution_sound_played = true;
            stats
        }
        Transition::Second(target) => {
            let stats = creature.adopt(Stage::Third, target);
            creature.evolution_sound_played = false;
            stats
        }
    }
}

// =============================================================================
// FULLY EVOLVED
// =============================================================================

/// Both stats maxed and nothing pending.
#[must_use]
pub fn is_fully_evolved(creature: &Creature, tasks_pending: bool) -> bool {
    creature.is_maxed() && !tasks_pending
}

// =============================================================================
// TESTS
// =============================================================================
