use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, RosterSave};
use super::migration::migrate_save;
use super::RosterStore;
use crate::state::RosterState;

use serde_json::Value;
use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_SAVE_FILE: &str = "roster.dat";

/// File-backed roster store. Owns one save file inside `dir`.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
    file_name: String,
}

impl SaveManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), file_name: DEFAULT_SAVE_FILE.to_string() }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    /// Persist the roster subset of `state`
    pub fn save_state(&self, state: &RosterState) -> Result<(), SaveError> {
        let save = RosterSave::from_state(state)?;
        Self::save_to_path(&self.path(), &save)
    }

    /// Read, verify and migrate the stored roster
    pub fn load_save(&self) -> Result<RosterSave, SaveError> {
        Self::load_from_path(&self.path())
    }

    pub fn delete(&self) -> Result<(), SaveError> {
        let path = self.path();
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted saved roster {:?}", path);
        }
        Ok(())
    }

    fn save_to_path(path: &Path, save: &RosterSave) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<RosterSave, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let save = migrate_save(decompress_and_deserialize(&data)?)?;

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

impl RosterStore for SaveManager {
    fn save(&mut self, state: &RosterState) -> bool {
        match self.save_state(state) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save roster to {:?}: {}", self.path(), e);
                false
            }
        }
    }

    fn load(&self) -> Option<Value> {
        match self.load_save() {
            Ok(save) => Some(save.roster),
            Err(SaveError::FileNotFound { .. }) => {
                log::debug!("No saved roster at {:?}", self.path());
                None
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("Could not read roster save {:?}: {}", self.path(), e);
                None
            }
            Err(e) => {
                log::warn!("Ignoring damaged roster save {:?}: {}", self.path(), e);
                None
            }
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.delete() {
            log::warn!("Failed to delete roster save {:?}: {}", self.path(), e);
        }
    }
}
