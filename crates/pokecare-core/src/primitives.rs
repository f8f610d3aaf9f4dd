//! # Care Primitives
//!
//! Hardcoded constants for the pokecare CORE.
//!
//! Every creature starts from seed data but the rules are fixed.
//! These values are compiled into the binary and are immutable at runtime.
//!
//! ## Groups
//!
//! 1. **Stat bounds**: the closed range health and happiness live in.
//! 2. **Stage gates**: caps and evolution windows per stage.
//! 3. **Action deltas**: what each care action does to the stats.
//! 4. **Storage keys**: the local-storage contract shared with the UI layer.

// =============================================================================
// STAT BOUNDS
// =============================================================================

/// Lowest value health or happiness can take.
pub const STAT_MIN: u32 = 0;

/// Highest value health or happiness can take.
pub const STAT_MAX: u32 = 2500;

// =============================================================================
// STAGE GATES
// =============================================================================

/// Cap applied to a base-stage creature while it still has tasks pending.
pub const BASE_PENDING_CAP: u32 = 1000;

/// Cap applied to a base-stage creature with tasks clear, and to a
/// second-stage creature with tasks pending.
pub const SECOND_STAGE_CAP: u32 = 2000;

/// Exclusive lower bound of the window that triggers the first evolution.
pub const FIRST_EVOLUTION_LOW: u32 = 1000;

/// Exclusive upper bound of the window that triggers the first evolution.
pub const FIRST_EVOLUTION_HIGH: u32 = 2000;

/// Inclusive floor both stats must reach for the second evolution.
pub const SECOND_EVOLUTION_FLOOR: u32 = 2000;

// =============================================================================
// ACTION DELTAS (health, happiness)
// =============================================================================

/// Feeding: small boost to both stats.
pub const FEED_DELTA: (i32, i32) = (50, 50);

/// Rare stone: large boost to both stats.
pub const STONE_DELTA: (i32, i32) = (200, 200);

/// Potion: heals, but the creature dislikes it.
pub const POTION_DELTA: (i32, i32) = (100, -20);

// =============================================================================
// STORAGE KEYS
// =============================================================================

/// Full roster snapshot (JSON array of creature records).
pub const ROSTER_KEY: &str = "pokemons";

/// Evolved appearance side table (JSON object, creature id -> override).
pub const OVERRIDES_KEY: &str = "evolvedPokemonStates";

/// Last viewed creature (JSON string). Written on behalf of the UI layer.
pub const SELECTED_KEY: &str = "selectedPokemonId";

/// Task list kept by the terminal front end's task board.
pub const TASKS_KEY: &str = "pokemonTasks";

/// Maximum size of a single stored value.
///
/// Mirrors the per-origin quota of browser local storage. Values larger
/// than this are rejected before any parsing is attempted.
pub const MAX_STORED_VALUE_LENGTH: usize = 5 * 1024 * 1024;

// =============================================================================
// DEFAULT CUES
// =============================================================================

/// Played when a creature changes form.
pub const EVOLUTION_CUE: &str = "evolution2.mp3";

/// Played when a creature becomes fully evolved.
pub const FULLY_EVOLVED_CUE: &str = "magic-mallet.mp3";
