//! # Stored Value Format
//!
//! JSON encoding for everything pokecare keeps in local storage.
//!
//! This is a pure transformation layer - no storage access.
//!
//! ## Validation
//!
//! Every decoder checks the value size against
//! [`MAX_STORED_VALUE_LENGTH`] before parsing. The override table is decoded
//! entry by entry so one malformed record does not hide the others.

use crate::primitives::MAX_STORED_VALUE_LENGTH;
use crate::{CreatureId, PetError, Roster, VisualOverride};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Raw override table, entries kept undecoded.
pub type RawOverrideTable = serde_json::Map<String, serde_json::Value>;

fn check_size(raw: &str) -> Result<(), PetError> {
    if raw.len() > MAX_STORED_VALUE_LENGTH {
        return Err(PetError::Deserialization(format!(
            "Stored value of {} bytes exceeds maximum allowed {} bytes",
            raw.len(),
            MAX_STORED_VALUE_LENGTH
        )));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, PetError> {
    check_size(raw)?;
    serde_json::from_str(raw).map_err(|e| PetError::Deserialization(e.to_string()))
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, PetError> {
    serde_json::to_string(value).map_err(|e| PetError::Serialization(e.to_string()))
}

// =============================================================================
// ROSTER
// =============================================================================

/// Encode a roster snapshot.
pub fn roster_to_json(roster: &Roster) -> Result<String, PetError> {
    encode(roster)
}

/// Decode a roster snapshot.
///
/// Legacy records get their stage settled from their visuals.
pub fn roster_from_json(raw: &str) -> Result<Roster, PetError> {
    let mut roster: Roster = decode(raw)?;
    roster.settle_stages();
    Ok(roster)
}

// =============================================================================
// OVERRIDE TABLE
// =============================================================================

/// Decode the override table without decoding its entries.
pub fn raw_overrides_from_json(raw: &str) -> Result<RawOverrideTable, PetError> {
    decode(raw)
}

/// Encode a raw override table.
pub fn raw_overrides_to_json(table: &RawOverrideTable) -> Result<String, PetError> {
    encode(table)
}

/// Decode each entry of a raw table.
///
/// Malformed entries are returned separately as `(id, reason)` so callers
/// can log them.
pub fn decode_overrides(
    table: RawOverrideTable,
) -> (BTreeMap<CreatureId, VisualOverride>, Vec<(String, String)>) {
    let mut decoded = BTreeMap::new();
    let mut rejected = Vec::new();

    for (id, value) in table {
        match serde_json::from_value::<VisualOverride>(value) {
            Ok(record) => {
                decoded.insert(CreatureId(id), record);
            }
            Err(e) => rejected.push((id, e.to_string())),
        }
    }

    (decoded, rejected)
}

/// Encode one override record as a table entry.
pub fn override_to_value(record: &VisualOverride) -> Result<serde_json::Value, PetError> {
    serde_json::to_value(record).map_err(|e| PetError::Serialization(e.to_string()))
}

// =============================================================================
// SELECTION
// =============================================================================

/// Encode the selected creature id.
pub fn selected_to_json(id: &CreatureId) -> Result<String, PetError> {
    encode(id)
}

/// Decode the selected creature id.
///
/// The browser build sometimes stored the bare id without quotes, so an
/// unparseable non-empty value is taken verbatim.
pub fn selected_from_json(raw: &str) -> Result<CreatureId, PetError> {
    check_size(raw)?;
    match serde_json::from_str::<CreatureId>(raw) {
        Ok(id) => Ok(id),
        Err(_) if !raw.trim().is_empty() => Ok(CreatureId::new(raw.trim())),
        Err(e) => Err(PetError::Deserialization(e.to_string())),
    }
}

// =============================================================================
// GENERIC VALUES
// =============================================================================

/// Encode any serializable value for storage.
pub fn value_to_json<T: Serialize>(value: &T) -> Result<String, PetError> {
    encode(value)
}

/// Decode any stored value.
pub fn value_from_json<T: DeserializeOwned>(raw: &str) -> Result<T, PetError> {
    decode(raw)
}

// =============================================================================
// TESTS
// =============================================================================
