//! # Configuration
//!
//! Optional TOML file naming the cues the front end plays.
//!
//! ## Lookup
//!
//! 1. `--config <path>` (must exist)
//! 2. `POKECARE_CONFIG` environment variable (must exist)
//! 3. `pokecare.toml` in the working directory (skipped if absent)
//!
//! ```toml
//! [cues]
//! feed = "eat.mp3"
//! evolution = "evolution2.mp3"
//! ```

use pokecare_core::PetError;
use pokecare_core::ServiceCues;
use pokecare_core::primitives::{EVOLUTION_CUE, FULLY_EVOLVED_CUE};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pokecare.toml";

/// Maximum config file size. Anything larger is not a cue table.
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Cue identifiers, one per user-visible event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CueConfig {
    pub feed: String,
    pub stone: String,
    pub potion: String,
    pub select: String,
    pub evolution: String,
    pub fully_evolved: String,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            feed: "eat.mp3".to_string(),
            stone: "moonstone.mp3".to_string(),
            potion: "potion.mp3".to_string(),
            select: "sword-sound.mp3".to_string(),
            evolution: EVOLUTION_CUE.to_string(),
            fully_evolved: FULLY_EVOLVED_CUE.to_string(),
        }
    }
}

impl CueConfig {
    /// The cues the core service plays on its own.
    #[must_use]
    pub fn service_cues(&self) -> ServiceCues {
        ServiceCues {
            evolution: self.evolution.clone(),
            fully_evolved: self.fully_evolved.clone(),
        }
    }
}

/// Front-end configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cues: CueConfig,
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, PetError> {
        toml::from_str(text).map_err(|e| PetError::Config(e.to_string()))
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self, PetError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            PetError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(PetError::Config(format!(
                "Config file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            PetError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Resolve and load the config following the lookup order.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PetError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = config_path_from_env() {
            return Self::from_file(&path);
        }

        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            tracing::debug!("using {}", DEFAULT_CONFIG_FILE);
            return Self::from_file(default);
        }

        Ok(Self::default())
    }
}

/// Get the config path from `POKECARE_CONFIG`, if set and non-empty.
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("POKECARE_CONFIG")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}
