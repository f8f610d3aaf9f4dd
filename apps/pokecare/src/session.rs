//! # Pet Session
//!
//! What the browser UI used to do around the care service:
//! - restore the last selection and any evolved appearances on startup
//! - select a creature (runs an evolution check and plays the select cue)
//! - wrap-around next/previous navigation
//! - keep the task board in storage
//!
//! The session writes only the selection and task keys itself; the roster
//! and override keys go through the core's `RosterStore`.

use crate::config::{Config, CueConfig};
use pokecare_core::primitives::TASKS_KEY;
use pokecare_core::{
    CareService, Command, CommandOutcome, Creature, CreatureId, CueSink, EvolutionOutcome,
    ItemStore, PetError, RosterStore, Stage, Task, TaskBoard, formats,
};
use serde::Serialize;

/// A care action chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAction {
    Feed,
    Stone,
    Potion,
}

/// What a care action did, including the follow-up evolution check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareReport {
    pub applied: bool,
    pub evolution: EvolutionOutcome,
}

/// Front-end session over one item store.
#[derive(Debug)]
pub struct PetSession<S, C> {
    service: CareService<S, TaskBoard, C>,
    cues: CueConfig,
    selected: Option<CreatureId>,
}

impl<S: ItemStore, C: CueSink> PetSession<S, C> {
    /// Open a session and restore the saved state.
    pub fn open(items: S, cues: C, config: &Config) -> Self {
        let tasks = load_tasks(&items);
        let service = CareService::new(RosterStore::new(items), tasks, cues)
            .with_cue_names(config.cues.service_cues());

        let mut session = Self {
            service,
            cues: config.cues.clone(),
            selected: None,
        };
        session.restore();
        session
    }

    /// Apply stored overrides and pick the initial selection.
    fn restore(&mut self) {
        let store = self.service.store_mut();
        let mut roster = match store.try_load() {
            Ok(roster) => roster,
            Err(e) => {
                // Nothing is written back over a roster we could not read.
                tracing::warn!(error = %e, "roster read failed, restoring selection only");
                self.selected = store.selected_id();
                return;
            }
        };

        let changed = store.apply_overrides(&mut roster);
        if changed > 0 {
            tracing::info!(changed, "restored evolved appearances");
            if let Err(e) = store.save(&roster) {
                tracing::warn!(error = %e, "roster write failed");
            }
        }

        let selected = store
            .selected_id()
            .filter(|id| roster.get(id).is_some())
            .or_else(|| roster.at(0).map(|c| c.id.clone()));

        if let Some(id) = &selected {
            if let Err(e) = store.set_selected_id(id) {
                tracing::warn!(error = %e, "selection write failed");
            }
        }
        self.selected = selected;
    }

    /// The care service.
    #[must_use]
    pub fn service(&self) -> &CareService<S, TaskBoard, C> {
        &self.service
    }

    /// The cue sink.
    #[must_use]
    pub fn cues(&self) -> &C {
        self.service.cues()
    }

    /// Every creature, freshly read.
    #[must_use]
    pub fn creatures(&self) -> Vec<Creature> {
        self.service.creatures()
    }

    /// The selected creature id.
    #[must_use]
    pub fn selected(&self) -> Option<&CreatureId> {
        self.selected.as_ref()
    }

    /// The selected creature, freshly read.
    #[must_use]
    pub fn selected_creature(&self) -> Option<Creature> {
        self.selected
            .as_ref()
            .and_then(|id| self.service.creature(id))
    }

    /// Resolve an explicit id, or fall back to the selection.
    pub fn resolve(&self, id: Option<&CreatureId>) -> Result<Creature, PetError> {
        let id = id
            .or(self.selected.as_ref())
            .ok_or(PetError::NoSelection)?;
        self.service
            .creature(id)
            .ok_or_else(|| PetError::CreatureNotFound(id.clone()))
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    /// Select a creature: evolution check, select cue, remember it.
    pub fn select(&mut self, id: &CreatureId) -> Result<EvolutionOutcome, PetError> {
        let outcome = self
            .service
            .check_and_update(id)
            .ok_or_else(|| PetError::CreatureNotFound(id.clone()))?;

        self.service.cues_mut().play(&self.cues.select);
        self.service.store_mut().set_selected_id(id)?;
        self.selected = Some(id.clone());
        Ok(outcome)
    }

    /// Select the next creature, wrapping to the first.
    pub fn select_next(&mut self) -> Result<EvolutionOutcome, PetError> {
        let target = self.neighbour(Direction::Next)?;
        self.select(&target)
    }

    /// Select the previous creature, wrapping to the last.
    pub fn select_previous(&mut self) -> Result<EvolutionOutcome, PetError> {
        let target = self.neighbour(Direction::Previous)?;
        self.select(&target)
    }

    fn neighbour(&self, direction: Direction) -> Result<CreatureId, PetError> {
        let roster = self.service.store().load();
        let len = roster.len();
        if len == 0 {
            return Err(PetError::NoSelection);
        }

        let current = self.selected.as_ref().and_then(|id| roster.position(id));
        let index = match (direction, current) {
            (Direction::Next, Some(i)) => (i + 1) % len,
            (Direction::Next, None) => 0,
            (Direction::Previous, Some(i)) => (i + len - 1) % len,
            (Direction::Previous, None) => len - 1,
        };

        roster
            .at(index)
            .map(|c| c.id.clone())
            .ok_or(PetError::NoSelection)
    }

    // =========================================================================
    // CARE
    // =========================================================================

    /// Apply a care action, then run the evolution check as the UI does.
    pub fn care(
        &mut self,
        id: Option<&CreatureId>,
        action: CareAction,
    ) -> Result<CareReport, PetError> {
        let creature = self.resolve(id)?;
        let command = match action {
            CareAction::Feed => Command::Feed {
                cue: self.cues.feed.clone(),
            },
            CareAction::Stone => Command::UseStone {
                cue: self.cues.stone.clone(),
            },
            CareAction::Potion => Command::UsePotion {
                cue: self.cues.potion.clone(),
            },
        };

        let applied = match self.service.apply(&creature.id, &command) {
            CommandOutcome::Adjusted { applied } => applied,
            CommandOutcome::Evolution(_) => false,
        };
        let evolution = self.check(Some(&creature.id))?;
        Ok(CareReport { applied, evolution })
    }

    /// Run the evolution check on its own.
    pub fn check(&mut self, id: Option<&CreatureId>) -> Result<EvolutionOutcome, PetError> {
        let creature = self.resolve(id)?;
        match self.service.apply(&creature.id, &Command::CheckEvolution) {
            CommandOutcome::Evolution(Some(outcome)) => Ok(outcome),
            _ => Err(PetError::CreatureNotFound(creature.id)),
        }
    }

    // =========================================================================
    // TASKS
    // =========================================================================

    /// Pending tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        self.service.tasks().all()
    }

    /// Add a task gating `id` (or the selection) at `stage`, defaulting to
    /// the creature's current stage.
    pub fn add_task(
        &mut self,
        id: Option<&CreatureId>,
        stage: Option<Stage>,
        title: &str,
    ) -> Result<u64, PetError> {
        let creature = self.resolve(id)?;
        let stage = stage.unwrap_or_else(|| creature.stage());
        let task = self.service.tasks_mut().add(creature.id, stage, title);
        self.save_tasks()?;
        Ok(task)
    }

    /// Complete a task by id.
    pub fn complete_task(&mut self, task: u64) -> Result<Option<Task>, PetError> {
        let done = self.service.tasks_mut().complete(task);
        if done.is_some() {
            self.save_tasks()?;
        }
        Ok(done)
    }

    fn save_tasks(&mut self) -> Result<(), PetError> {
        let raw = formats::value_to_json(self.service.tasks())?;
        self.service
            .store_mut()
            .items_mut()
            .set_item(TASKS_KEY, &raw)
    }

    /// Forget everything and start again from the seed roster.
    pub fn reset(&mut self) -> Result<(), PetError> {
        self.service.store_mut().clear()?;
        self.service.store_mut().items_mut().remove_item(TASKS_KEY)?;
        *self.service.tasks_mut() = TaskBoard::new();
        self.selected = None;
        self.restore();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Next,
    Previous,
}

/// Read the task board, falling back to an empty one.
fn load_tasks<S: ItemStore>(items: &S) -> TaskBoard {
    let raw = match items.get_item(TASKS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return TaskBoard::new(),
        Err(e) => {
            tracing::warn!(error = %e, "task read failed");
            return TaskBoard::new();
        }
    };

    formats::value_from_json(&raw).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "discarding unreadable task board");
        TaskBoard::new()
    })
}
