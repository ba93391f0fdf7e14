use serde_json::Value;

use super::error::SaveError;
use super::format::RosterSave;
use super::SAVE_VERSION;

/// Oldest layout this build can still read. Version 1 saves identified
/// players only by their position in the lineup/bench arrays.
pub const OLDEST_SUPPORTED_VERSION: u32 = 1;

const PLAYER_LISTS: [&str; 2] = ["lineup", "bench"];

/// Migrate save data from older versions to current version
pub fn migrate_save(mut save: RosterSave) -> Result<RosterSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        OLDEST_SUPPORTED_VERSION => migrate_v1_to_v2(save)?,
        SAVE_VERSION => save,
        v if v > SAVE_VERSION => {
            // Unknown newer layout; hydration will reject it if it does not fit
            log::warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            save
        }
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    save.version = SAVE_VERSION;
    save.update_timestamp();

    if original_version != SAVE_VERSION {
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Version 1 → 2: give every player without an `id` a fresh one, numbered
/// after the largest id already present. Lineup entries come first, then
/// the bench, each in array order.
fn migrate_v1_to_v2(mut save: RosterSave) -> Result<RosterSave, SaveError> {
    log::info!("Migrating save from version 1 to 2");

    let roster = save.roster.as_object_mut().ok_or(SaveError::Corrupted)?;

    let mut next_id = PLAYER_LISTS
        .iter()
        .filter_map(|key| roster.get(*key).and_then(Value::as_array))
        .flatten()
        .filter_map(|p| p.get("id").and_then(Value::as_u64))
        .max()
        .unwrap_or(0)
        + 1;

    let mut assigned = 0;
    for key in PLAYER_LISTS {
        let Some(Value::Array(entries)) = roster.get_mut(key) else {
            continue;
        };

        for entry in entries.iter_mut() {
            if let Value::Object(fields) = entry {
                if !fields.contains_key("id") {
                    fields.insert("id".to_string(), Value::from(next_id));
                    next_id += 1;
                    assigned += 1;
                }
            }
        }
    }

    if assigned > 0 {
        log::info!("Assigned ids to {} legacy players", assigned);
    }

    Ok(save)
}

/// Check if a save file needs migration
pub fn needs_migration(save: &RosterSave) -> bool {
    save.version < SAVE_VERSION
}
