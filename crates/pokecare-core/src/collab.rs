//! # Collaborators
//!
//! The two services the care engine consults but does not own:
//!
//! - [`TaskQuery`]: which tasks still block a creature at a given stage.
//!   Only the count matters to the engine.
//! - [`CueSink`]: fire-and-forget notifications (sound effects in the
//!   browser build). Nothing a sink does is read back.
//!
//! Both traits are extension points. The implementations shipped here are
//! what the terminal front end and the tests use.

use crate::{CreatureId, Stage};
use serde::{Deserialize, Serialize};

// =============================================================================
// TASKS
// =============================================================================

/// A prerequisite that must be cleared before a creature can advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub creature_id: CreatureId,
    pub stage: Stage,
    pub title: String,
}

/// Read-only view of outstanding tasks.
pub trait TaskQuery {
    /// Tasks still pending for `creature` at `stage`.
    fn tasks_for(&self, creature: &CreatureId, stage: Stage) -> Vec<Task>;

    /// Check whether anything is pending for `creature` at `stage`.
    fn has_pending(&self, creature: &CreatureId, stage: Stage) -> bool {
        !self.tasks_for(creature, stage).is_empty()
    }
}

impl<T: TaskQuery + ?Sized> TaskQuery for &T {
    fn tasks_for(&self, creature: &CreatureId, stage: Stage) -> Vec<Task> {
        (**self).tasks_for(creature, stage)
    }
}

/// Simple task list keyed by creature and stage.
///
/// Completing a task removes it; the board keeps no history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBoard {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task. Returns its id.
    pub fn add(&mut self, creature: CreatureId, stage: Stage, title: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.tasks.push(Task {
            id,
            creature_id: creature,
            stage,
            title: title.into(),
        });
        id
    }

    /// Complete (remove) a task by id.
    pub fn complete(&mut self, id: u64) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Every pending task, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl TaskQuery for TaskBoard {
    fn tasks_for(&self, creature: &CreatureId, stage: Stage) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|t| &t.creature_id == creature && t.stage == stage)
            .cloned()
            .collect()
    }
}

// =============================================================================
// CUES
// =============================================================================

/// Receiver of fire-and-forget cues.
pub trait CueSink {
    /// Ordinary effect (care actions, selection, fully evolved).
    fn play(&mut self, cue: &str);

    /// Evolution fanfare.
    fn play_evolution(&mut self, cue: &str);
}

impl<C: CueSink + ?Sized> CueSink for &mut C {
    fn play(&mut self, cue: &str) {
        (**self).play(cue);
    }

    fn play_evolution(&mut self, cue: &str) {
        (**self).play_evolution(cue);
    }
}

/// One recorded cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueEvent {
    Effect(String),
    Evolution(String),
}

impl CueEvent {
    /// The cue identifier.
    #[must_use]
    pub fn cue(&self) -> &str {
        match self {
            CueEvent::Effect(cue) | CueEvent::Evolution(cue) => cue,
        }
    }
}

/// Sink that records every cue in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueLog {
    events: Vec<CueEvent>,
}

impl CueLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[CueEvent] {
        &self.events
    }

    /// Drain recorded events.
    pub fn take(&mut self) -> Vec<CueEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of times `cue` was played, either kind.
    #[must_use]
    pub fn count(&self, cue: &str) -> usize {
        self.events.iter().filter(|e| e.cue() == cue).count()
    }
}

impl CueSink for CueLog {
    fn play(&mut self, cue: &str) {
        self.events.push(CueEvent::Effect(cue.to_string()));
    }

    fn play_evolution(&mut self, cue: &str) {
        self.events.push(CueEvent::Evolution(cue.to_string()));
    }
}

/// Sink that turns cues into `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCues;

impl CueSink for TracingCues {
    fn play(&mut self, cue: &str) {
        tracing::info!(target: "pokecare::cue", cue, "effect");
    }

    fn play_evolution(&mut self, cue: &str) {
        tracing::info!(target: "pokecare::cue", cue, "evolution");
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_filters_by_creature_and_stage() {
        let mut board = TaskBoard::new();
        let p1 = CreatureId::new("p1");
        board.add(p1.clone(), Stage::Base, "Walk 5k");
        board.add(p1.clone(), Stage::Second, "Read a chapter");
        board.add(CreatureId::new("p2"), Stage::Base, "Stretch");

        assert_eq!(board.tasks_for(&p1, Stage::Base).len(), 1);
        assert!(board.has_pending(&p1, Stage::Second));
        assert!(!board.has_pending(&p1, Stage::Third));
    }

    #[test]
    fn complete_removes_task() {
        let mut board = TaskBoard::new();
        let p1 = CreatureId::new("p1");
        let first = board.add(p1.clone(), Stage::Base, "a");
        let second = board.add(p1.clone(), Stage::Base, "b");
        assert_ne!(first, second);

        assert_eq!(board.complete(first).map(|t| t.title), Some("a".to_string()));
        assert_eq!(board.complete(first), None);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn ids_are_not_reused_after_completion() {
        let mut board = TaskBoard::new();
        let p1 = CreatureId::new("p1");
        let first = board.add(p1.clone(), Stage::Base, "a");
        board.complete(first);
        let next = board.add(p1, Stage::Base, "b");
        assert!(next > first);
    }

    #[test]
    fn cue_log_records_kinds_in_order() {
        let mut log = CueLog::new();
        log.play("eat.mp3");
        log.play_evolution("evolution2.mp3");
        log.play("eat.mp3");

        assert_eq!(log.count("eat.mp3"), 2);
        assert_eq!(
            log.events()[1],
            CueEvent::Evolution("evolution2.mp3".to_string())
        );
        assert_eq!(log.take().len(), 3);
        assert!(log.events().is_empty());
    }
}
