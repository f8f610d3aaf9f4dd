//! # Formats Module
//!
//! Encoding of the values kept in local storage.

mod json;

pub use json::*;
