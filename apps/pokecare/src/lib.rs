//! # Pokecare Front End
//!
//! Everything between a user and `pokecare-core`: the CLI, the optional
//! cue config file and the session that remembers the selection.

pub mod cli;
pub mod config;
pub mod session;

pub use config::{Config, CueConfig};
pub use session::{CareAction, CareReport, PetSession};
