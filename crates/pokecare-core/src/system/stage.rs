//! # Evolution Stages
//!
//! ## Stage Definitions
//!
//! | Stage | Number | Entry |
//! |-------|--------|-------|
//! | Base | 1 | Seed data |
//! | Second | 2 | Both stats inside (1000, 2000), tasks clear |
//! | Third | 3 | Both stats >= 2000, tasks clear, first evolution seen |
//!
//! Stages only ever move forward.

use serde::{Deserialize, Serialize};

// =============================================================================
// STAGE ENUM
// =============================================================================

/// The three forms a creature can display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Stage 1: the form the creature is seeded with.
    #[default]
    Base,
    /// Stage 2: the first evolution.
    Second,
    /// Stage 3: the final evolution.
    Third,
}

impl Stage {
    /// Get the stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Base => "Base Form",
            Stage::Second => "Second Form",
            Stage::Third => "Final Form",
        }
    }

    /// Stage number as shown to the task service (1-based).
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Stage::Base => 1,
            Stage::Second => 2,
            Stage::Third => 3,
        }
    }

    /// Stage for a 1-based stage number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Stage> {
        match number {
            1 => Some(Stage::Base),
            2 => Some(Stage::Second),
            3 => Some(Stage::Third),
            _ => None,
        }
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Base => Some(Stage::Second),
            Stage::Second => Some(Stage::Third),
            Stage::Third => None,
        }
    }

    /// Check if this stage is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Third)
    }

    /// Infer the stage from which visual identifier is active.
    ///
    /// Only used for records persisted before the stage was stored.
    /// The third-form check wins over the second-form check.
    #[must_use]
    pub fn infer_from_visual(
        current: &str,
        second: Option<&str>,
        third: Option<&str>,
    ) -> Stage {
        if third == Some(current) {
            Stage::Third
        } else if second == Some(current) {
            Stage::Second
        } else {
            Stage::Base
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}: {}", self.number(), self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================
