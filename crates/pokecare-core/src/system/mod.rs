//! # System Module
//!
//! Evolution stages.
//!
//! A creature's stage is stored explicitly on its record. The only place a
//! stage is ever derived from visual identifiers is when a legacy record
//! without a stage field is decoded.

mod stage;

pub use stage::*;
