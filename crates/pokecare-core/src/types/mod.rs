//! # Core Type Definitions
//!
//! This module contains all core types for the pokecare engine:
//! - Identifiers and bounded stats (`CreatureId`, `Stat`)
//! - The creature record and its evolution targets (`Creature`, `FormTarget`)
//! - Collections and side records (`Roster`, `VisualOverride`)
//! - Error types (`PetError`)
//!
//! ## Storage Compatibility
//!
//! Records serialize with the camelCase field names the browser build wrote
//! into local storage, so old snapshots decode unchanged. Every field that a
//! snapshot may omit carries a serde default.

use crate::primitives::STAT_MAX;
use crate::system::Stage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Opaque, immutable identifier of a creature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub String);

impl CreatureId {
    /// Create a new identifier from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// STAT
// =============================================================================

/// Health or happiness value, always inside `[0, STAT_MAX]`.
///
/// Construction clamps, so an out-of-range value can never be observed.
/// Stored snapshots may hold `null`, a missing field, or a value outside the
/// range; all of those decode to a valid stat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "Option<i64>", into = "u32")]
pub struct Stat(u32);

impl Stat {
    /// The floor.
    pub const MIN: Stat = Stat(0);
    /// The ceiling.
    pub const MAX: Stat = Stat(STAT_MAX);

    /// Create a stat, clamping into range.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, STAT_MAX as i64) as u32)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Add a signed delta, clamping into range.
    #[must_use]
    pub fn offset(self, delta: i32) -> Self {
        Self::new((self.0 as i64).saturating_add(delta as i64))
    }

    /// Lower the stat to `cap` if it is above it.
    #[must_use]
    pub fn capped(self, cap: u32) -> Self {
        Self(self.0.min(cap))
    }

    /// Check whether the stat sits at the ceiling.
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == STAT_MAX
    }
}

impl From<Option<i64>> for Stat {
    fn from(value: Option<i64>) -> Self {
        Self::new(value.unwrap_or(0))
    }
}

impl From<Stat> for u32 {
    fn from(stat: Stat) -> Self {
        stat.0
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// FORM TARGET
// =============================================================================

/// The values a creature adopts when it evolves into a stage.
///
/// Only `name` is required for the target to exist. Every other field falls
/// back to the creature's current value when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTarget {
    pub name: String,
    pub gif: Option<String>,
    pub avatar: Option<String>,
    pub attack: Option<u32>,
    pub defense: Option<u32>,
}

impl FormTarget {
    /// Create a fully specified target.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        gif: impl Into<String>,
        avatar: impl Into<String>,
        attack: u32,
        defense: u32,
    ) -> Self {
        Self {
            name: name.into(),
            gif: Some(gif.into()),
            avatar: Some(avatar.into()),
            attack: Some(attack),
            defense: Some(defense),
        }
    }
}

// =============================================================================
// CREATURE
// =============================================================================

/// A creature under care.
///
/// The flat `second*`/`third*` fields are the stored layout; use
/// [`Creature::target`] to read them as a [`FormTarget`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub id: CreatureId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub gif: String,
    #[serde(default)]
    pub health: Stat,
    #[serde(default)]
    pub happiness: Stat,
    #[serde(default)]
    pub energy: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_evolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_gif: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_attack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_defense: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_evolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_gif: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_attack: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_defense: Option<u32>,

    #[serde(default)]
    pub evolution_sound_played: bool,
    #[serde(default)]
    pub is_fully_evolved: bool,

    /// Absent on legacy records until [`Creature::settle_stage`] runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stage: Option<Stage>,
}

impl Creature {
    /// Create a base-stage creature with zeroed stats and no evolution line.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        gif: impl Into<String>,
        avatar: impl Into<String>,
        attack: u32,
        defense: u32,
    ) -> Self {
        Self {
            id: CreatureId::new(id),
            name: name.into(),
            avatar: avatar.into(),
            gif: gif.into(),
            health: Stat::MIN,
            happiness: Stat::MIN,
            energy: 0,
            attack,
            defense,
            second_evolution: None,
            second_gif: None,
            second_avatar: None,
            second_attack: None,
            second_defense: None,
            third_evolution: None,
            third_gif: None,
            third_avatar: None,
            third_attack: None,
            third_defense: None,
            evolution_sound_played: false,
            is_fully_evolved: false,
            stage: Some(Stage::Base),
        }
    }

    /// Set the stage-2 target.
    #[must_use]
    pub fn with_second(mut self, target: FormTarget) -> Self {
        self.second_evolution = Some(target.name);
        self.second_gif = target.gif;
        self.second_avatar = target.avatar;
        self.second_attack = target.attack;
        self.second_defense = target.defense;
        self
    }

    /// Set the stage-3 target.
    #[must_use]
    pub fn with_third(mut self, target: FormTarget) -> Self {
        self.third_evolution = Some(target.name);
        self.third_gif = target.gif;
        self.third_avatar = target.avatar;
        self.third_attack = target.attack;
        self.third_defense = target.defense;
        self
    }

    /// Set the energy carried in the override record.
    #[must_use]
    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self
    }

    /// Set both stats.
    #[must_use]
    pub fn with_stats(mut self, health: Stat, happiness: Stat) -> Self {
        self.health = health;
        self.happiness = happiness;
        self
    }

    /// Force the stored stage, e.g. when importing hand-edited data.
    ///
    /// This does not touch `evolution_sound_played`.
    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Current stage.
    ///
    /// Falls back to visual inference for a legacy record that has not been
    /// settled yet.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage.unwrap_or_else(|| self.visual_stage())
    }

    /// Store the inferred stage on a legacy record. No-op once set.
    pub fn settle_stage(&mut self) {
        if self.stage.is_none() {
            self.stage = Some(self.visual_stage());
        }
    }

    fn visual_stage(&self) -> Stage {
        Stage::infer_from_visual(
            &self.gif,
            self.second_gif.as_deref(),
            self.third_gif.as_deref(),
        )
    }

    /// The target for `stage`, if the creature has one.
    ///
    /// A target exists only when its name is present and non-empty.
    #[must_use]
    pub fn target(&self, stage: Stage) -> Option<FormTarget> {
        let (name, gif, avatar, attack, defense) = match stage {
            Stage::Base => return None,
            Stage::Second => (
                &self.second_evolution,
                &self.second_gif,
                &self.second_avatar,
                self.second_attack,
                self.second_defense,
            ),
            Stage::Third => (
                &self.third_evolution,
                &self.third_gif,
                &self.third_avatar,
                self.third_attack,
                self.third_defense,
            ),
        };
        let name = name.as_ref().filter(|n| !n.is_empty())?;
        Some(FormTarget {
            name: name.clone(),
            gif: gif.clone(),
            avatar: avatar.clone(),
            attack,
            defense,
        })
    }

    /// Adopt `target` as the current form and move to `stage`.
    ///
    /// Returns the adopted `(attack, defense)`.
    pub fn adopt(&mut self, stage: Stage, target: FormTarget) -> (u32, u32) {
        self.name = target.name;
        if let Some(gif) = target.gif {
            self.gif = gif;
        }
        if let Some(avatar) = target.avatar {
            self.avatar = avatar;
        }
        self.attack = target.attack.unwrap_or(self.attack);
        self.defense = target.defense.unwrap_or(self.defense);
        self.stage = Some(stage);
        (self.attack, self.defense)
    }

    /// Both stats at the ceiling.
    #[must_use]
    pub fn is_maxed(&self) -> bool {
        self.health.is_max() && self.happiness.is_max()
    }
}

// =============================================================================
// ROSTER
// =============================================================================

/// The full collection of creatures under care, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    creatures: Vec<Creature>,
}

impl Roster {
    /// Create a roster from creatures in display order.
    #[must_use]
    pub fn new(creatures: Vec<Creature>) -> Self {
        Self { creatures }
    }

    /// Number of creatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Creature> {
        self.creatures.iter()
    }

    /// Creature at a display position.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Creature> {
        self.creatures.get(index)
    }

    /// Look up a creature by id.
    #[must_use]
    pub fn get(&self, id: &CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| &c.id == id)
    }

    /// Look up a creature by id for mutation.
    pub fn get_mut(&mut self, id: &CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| &c.id == id)
    }

    /// Display position of a creature.
    #[must_use]
    pub fn position(&self, id: &CreatureId) -> Option<usize> {
        self.creatures.iter().position(|c| &c.id == id)
    }

    /// Replace the record with the same id. Returns false if absent.
    pub fn replace(&mut self, creature: Creature) -> bool {
        match self.get_mut(&creature.id) {
            Some(slot) => {
                *slot = creature;
                true
            }
            None => false,
        }
    }

    /// Settle the stage on every legacy record.
    pub fn settle_stages(&mut self) {
        for creature in &mut self.creatures {
            creature.settle_stage();
        }
    }

    /// Consume the roster into its creatures.
    #[must_use]
    pub fn into_vec(self) -> Vec<Creature> {
        self.creatures
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Creature;
    type IntoIter = std::slice::Iter<'a, Creature>;

    fn into_iter(self) -> Self::IntoIter {
        self.creatures.iter()
    }
}

// =============================================================================
// VISUAL OVERRIDE
// =============================================================================

/// Evolved appearance kept apart from the roster.
///
/// Lets the UI restore an evolved look even after the roster is reseeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualOverride {
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub gif: String,
    #[serde(default)]
    pub energy: u32,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
}

impl From<&Creature> for VisualOverride {
    fn from(creature: &Creature) -> Self {
        Self {
            name: creature.name.clone(),
            avatar: creature.avatar.clone(),
            gif: creature.gif.clone(),
            energy: creature.energy,
            attack: creature.attack,
            defense: creature.defense,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in pokecare.
///
/// None of these are fatal to the care loop: the service logs them and
/// carries on. They surface only at explicit storage and config boundaries.
#[derive(Debug, Error)]
pub enum PetError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored value could not be decoded.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// No creature with this id is in the roster.
    #[error("Creature not found: {0}")]
    CreatureNotFound(CreatureId),

    /// An operation defaulted to the selection, but nothing is selected.
    #[error("No creature selected")]
    NoSelection,

    /// Configuration could not be read or is invalid.
    #[error("Config error: {0}")]
    Config(String),
}

// =============================================================================
// TESTS
// =============================================================================
