use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::Player;
use crate::state::{Lineup, RosterState};
use crate::tactics::Formation;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// The persisted subset of [`RosterState`]. Field names match the keys the
/// hydration step accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PersistedRoster {
    pub lineup: Lineup,
    pub bench: Vec<Player>,
    pub selected: Option<usize>,
    pub formation: Formation,
}

impl From<&RosterState> for PersistedRoster {
    fn from(state: &RosterState) -> Self {
        Self {
            lineup: state.lineup.clone(),
            bench: state.bench.clone(),
            selected: state.selected,
            formation: state.formation,
        }
    }
}

/// On-disk envelope. The roster is kept as a loose JSON value so that older
/// layouts can still be read and migrated before hydration validates them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RosterSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    pub roster: Value,
}

impl RosterSave {
    pub fn from_state(state: &RosterState) -> Result<Self, SaveError> {
        let roster = serde_json::to_value(PersistedRoster::from(state))?;
        Ok(Self { version: SAVE_VERSION, timestamp: current_timestamp(), roster })
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// The roster must be a JSON object; its fields are checked on hydration.
    pub fn validate(&self) -> Result<(), SaveError> {
        if !self.roster.is_object() {
            return Err(SaveError::Corrupted);
        }
        Ok(())
    }
}

/// Serialize and compress a roster save
pub fn serialize_and_compress(save: &RosterSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    // MessagePack with field names, LZ4 with size prefix, SHA-256 trailer
    let msgpack = to_vec_named(save).map_err(SaveError::Serialization)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a roster save
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<RosterSave, SaveError> {
    // size prefix + checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: RosterSave = from_slice(&msgpack).map_err(SaveError::Deserialization)?;

    save.validate()?;
    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
