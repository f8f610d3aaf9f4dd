//! # pokecare-core
//!
//! The care engine for pokecare - THE LOGIC.
//!
//! This crate tracks a small roster of creatures, applies care actions to
//! their health and happiness, and evolves a creature's form once its stats
//! and its externally tracked tasks allow it. State lives in a key/value
//! store shaped like browser local storage.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is the ONLY writer of the roster and override keys
//! - Re-reads the roster before every mutation (last write wins)
//! - Never fails a care operation; storage problems are logged and absorbed
//! - Reaches tasks and sound cues through traits only
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod collab;
pub mod evolution;
pub mod formats;
pub mod primitives;
pub mod roster;
pub mod seed;
pub mod service;
pub mod storage;
pub mod system;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Creature, CreatureId, FormTarget, PetError, Roster, Stat, VisualOverride};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use collab::{CueEvent, CueLog, CueSink, Task, TaskBoard, TaskQuery, TracingCues};
pub use evolution::Transition;
pub use roster::RosterStore;
pub use seed::default_roster;
pub use service::{CareService, Command, CommandOutcome, EvolutionOutcome, ServiceCues};
pub use storage::{ItemStore, MemoryStore, RedbStore, StorageBackend};

// =============================================================================
// RE-EXPORTS: System (from system module)
// =============================================================================

pub use system::Stage;
