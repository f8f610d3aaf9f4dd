//! # Care Service
//!
//! The creature progression service: stat actions and the evolution state
//! machine, sequenced with persistence and cues.
//!
//! Every operation follows the same shape:
//!
//! 1. re-read the roster from storage
//! 2. locate the creature (unknown id: nothing changes)
//! 3. mutate
//! 4. persist the whole roster
//! 5. emit cues
//!
//! Storage write failures are logged and the operation carries on; no care
//! operation can fail.

use crate::collab::{CueSink, TaskQuery};
use crate::evolution::{self, Transition};
use crate::primitives::{EVOLUTION_CUE, FEED_DELTA, FULLY_EVOLVED_CUE, POTION_DELTA, STONE_DELTA};
use crate::roster::RosterStore;
use crate::storage::ItemStore;
use crate::{Creature, CreatureId, Roster};
use serde::{Deserialize, Serialize};

// =============================================================================
// COMMANDS
// =============================================================================

/// A care operation addressed to one creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// +50 health, +50 happiness.
    Feed { cue: String },
    /// +200 health, +200 happiness.
    UseStone { cue: String },
    /// +100 health, -20 happiness.
    UsePotion { cue: String },
    /// Run the evolution state machine.
    CheckEvolution,
}

impl Command {
    /// `(health, happiness)` delta for stat actions.
    #[must_use]
    pub fn stat_delta(&self) -> Option<(i32, i32)> {
        match self {
            Command::Feed { .. } => Some(FEED_DELTA),
            Command::UseStone { .. } => Some(STONE_DELTA),
            Command::UsePotion { .. } => Some(POTION_DELTA),
            Command::CheckEvolution => None,
        }
    }
}

/// What [`CareService::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A stat action ran. `applied` is false when the creature was unknown
    /// or already at 2500/2500.
    Adjusted { applied: bool },
    /// The state machine ran. `None` for an unknown creature.
    Evolution(Option<EvolutionOutcome>),
}

/// Result of one evolution check.
///
/// `attack` and `defense` are the adopted values when a transition fired,
/// zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionOutcome {
    pub has_evolved: bool,
    pub attack: u32,
    pub defense: u32,
}

/// Cue identifiers the service emits on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCues {
    pub evolution: String,
    pub fully_evolved: String,
}

impl Default for ServiceCues {
    fn default() -> Self {
        Self {
            evolution: EVOLUTION_CUE.to_string(),
            fully_evolved: FULLY_EVOLVED_CUE.to_string(),
        }
    }
}

// =============================================================================
// CARE SERVICE
// =============================================================================

/// Owns the roster store and drives every mutation.
#[derive(Debug)]
pub struct CareService<S, T, C> {
    store: RosterStore<S>,
    tasks: T,
    cues: C,
    cue_names: ServiceCues,
}

impl<S: ItemStore, T: TaskQuery, C: CueSink> CareService<S, T, C> {
    /// Create a service over a roster store and its collaborators.
    #[must_use]
    pub fn new(store: RosterStore<S>, tasks: T, cues: C) -> Self {
        Self {
            store,
            tasks,
            cues,
            cue_names: ServiceCues::default(),
        }
    }

    /// Replace the evolution and fully-evolved cue identifiers.
    #[must_use]
    pub fn with_cue_names(mut self, cue_names: ServiceCues) -> Self {
        self.cue_names = cue_names;
        self
    }

    /// The roster store.
    #[must_use]
    pub fn store(&self) -> &RosterStore<S> {
        &self.store
    }

    /// The roster store, mutably (selection and foreign keys).
    pub fn store_mut(&mut self) -> &mut RosterStore<S> {
        &mut self.store
    }

    /// The task collaborator.
    #[must_use]
    pub fn tasks(&self) -> &T {
        &self.tasks
    }

    /// The task collaborator, mutably.
    pub fn tasks_mut(&mut self) -> &mut T {
        &mut self.tasks
    }

    /// The cue collaborator.
    #[must_use]
    pub fn cues(&self) -> &C {
        &self.cues
    }

    /// The cue collaborator, mutably.
    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    /// Every creature, freshly read.
    #[must_use]
    pub fn creatures(&self) -> Vec<Creature> {
        self.store.get_all()
    }

    /// One creature, freshly read.
    #[must_use]
    pub fn creature(&self, id: &CreatureId) -> Option<Creature> {
        self.store.get_by_id(id)
    }

    /// Dispatch a command.
    pub fn apply(&mut self, id: &CreatureId, command: &Command) -> CommandOutcome {
        match command {
            Command::Feed { cue } | Command::UseStone { cue } | Command::UsePotion { cue } => {
                let delta = command.stat_delta().unwrap_or((0, 0));
                let applied = self.adjust(id, delta, cue);
                CommandOutcome::Adjusted { applied }
            }
            Command::CheckEvolution => CommandOutcome::Evolution(self.check_and_update(id)),
        }
    }

    /// Feed a creature.
    pub fn feed(&mut self, id: &CreatureId, cue: &str) -> bool {
        self.adjust(id, FEED_DELTA, cue)
    }

    /// Use a rare stone on a creature.
    pub fn use_stone(&mut self, id: &CreatureId, cue: &str) -> bool {
        self.adjust(id, STONE_DELTA, cue)
    }

    /// Give a creature a potion.
    pub fn use_potion(&mut self, id: &CreatureId, cue: &str) -> bool {
        self.adjust(id, POTION_DELTA, cue)
    }

    /// Apply a stat delta, persist, then play `cue`.
    ///
    /// A creature at 2500/2500 is left untouched but the roster is still
    /// written and the cue still plays. The cue also plays for an unknown
    /// id. Returns whether stats were changed.
    fn adjust(&mut self, id: &CreatureId, (health, happiness): (i32, i32), cue: &str) -> bool {
        let applied = self.update(id, |creature| {
            if creature.is_maxed() {
                return false;
            }
            creature.health = creature.health.offset(health);
            creature.happiness = creature.happiness.offset(happiness);
            true
        });

        self.cues.play(cue);
        applied.unwrap_or(false)
    }

    /// Locate, mutate, persist. `None` for an unknown id or an unreadable
    /// store.
    fn update<R>(&mut self, id: &CreatureId, f: impl FnOnce(&mut Creature) -> R) -> Option<R> {
        let mut roster = self.read_for_write()?;
        let Some(creature) = roster.get_mut(id) else {
            tracing::debug!(creature = %id, "creature not found");
            return None;
        };
        let result = f(creature);
        self.persist(&roster);
        Some(result)
    }

    /// The stored roster, or `None` if the backend could not be read.
    fn read_for_write(&self) -> Option<Roster> {
        match self.store.try_load() {
            Ok(roster) => Some(roster),
            Err(e) => {
                tracing::warn!(error = %e, "roster read failed, skipping write");
                None
            }
        }
    }

    fn persist(&mut self, roster: &Roster) {
        if let Err(e) = self.store.save(roster) {
            tracing::warn!(error = %e, "roster write failed");
        }
    }

    /// Run the evolution state machine once for `id`.
    ///
    /// At most one transition fires per call. `None` for an unknown id, or
    /// when the store cannot be read (nothing is written then).
    pub fn check_and_update(&mut self, id: &CreatureId) -> Option<EvolutionOutcome> {
        let mut roster = self.read_for_write()?;
        let mut creature = roster.get(id)?.clone();

        let stage = creature.stage();
        let tasks_pending = self.tasks.has_pending(id, stage);
        let mut outcome = EvolutionOutcome::default();

        if creature.is_fully_evolved {
            // Only the cached flag is re-validated once fully evolved.
            if !evolution::is_fully_evolved(&creature, tasks_pending) {
                tracing::info!(creature = %id, "no longer fully evolved");
                creature.is_fully_evolved = false;
                roster.replace(creature);
                self.persist(&roster);
            }
            return Some(outcome);
        }

        if let Some(cap) = evolution::apply_cap(&mut creature, tasks_pending) {
            tracing::trace!(creature = %id, %stage, cap, tasks_pending, "stage cap applied");
        }

        if let Some(transition) = evolution::next_transition(&creature, tasks_pending) {
            self.fire(&mut roster, &mut creature, transition, &mut outcome);
        }

        creature.is_fully_evolved = evolution::is_fully_evolved(&creature, tasks_pending);
        if creature.is_fully_evolved {
            tracing::info!(creature = %id, name = %creature.name, "fully evolved");
            self.cues.play(&self.cue_names.fully_evolved);
        }

        roster.replace(creature);
        self.persist(&roster);
        Some(outcome)
    }

    fn fire(
        &mut self,
        roster: &mut Roster,
        creature: &mut Creature,
        transition: Transition,
        outcome: &mut EvolutionOutcome,
    ) {
        let from = creature.name.clone();
        let to_stage = transition.to_stage();
        let (attack, defense) = evolution::evolve(creature, transition);
        *outcome = EvolutionOutcome {
            has_evolved: true,
            attack,
            defense,
        };

        tracing::info!(
            creature = %creature.id,
            %from,
            to = %creature.name,
            stage = %to_stage,
            "evolved"
        );
        self.cues.play_evolution(&self.cue_names.evolution);

        roster.replace(creature.clone());
        self.persist(roster);
        if let Err(e) = self.store.save_visual_override(creature) {
            tracing::warn!(error = %e, "override write failed");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
