// Save/Load System for the roster
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, PersistedRoster, RosterSave};
pub use manager::SaveManager;
pub use migration::migrate_save;

use serde_json::Value;

use crate::state::RosterState;

/// Version 2 introduced stable player ids.
pub const SAVE_VERSION: u32 = 2;

/// Best-effort persistence used by the session. Failures are logged by the
/// implementation and never reach the caller as errors.
pub trait RosterStore {
    /// Persist the roster subset of `state`; `false` if it could not be written.
    fn save(&mut self, state: &RosterState) -> bool;

    /// Stored payload ready for hydration. Absent, unreadable and corrupt
    /// stores all yield `None`.
    fn load(&self) -> Option<Value>;

    fn clear(&mut self);
}

/// In-memory store, keeps the last saved payload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: Option<Value>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: Value) -> Self {
        Self { saved: Some(payload), saves: 0 }
    }
}

impl RosterStore for MemoryStore {
    fn save(&mut self, state: &RosterState) -> bool {
        match serde_json::to_value(PersistedRoster::from(state)) {
            Ok(value) => {
                self.saved = Some(value);
                self.saves += 1;
                true
            }
            Err(e) => {
                log::warn!("Failed to serialize roster: {}", e);
                false
            }
        }
    }

    fn load(&self) -> Option<Value> {
        self.saved.clone()
    }

    fn clear(&mut self) {
        self.saved = None;
    }
}
