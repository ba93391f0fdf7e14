//! Local copy of the last fetched catalog, kept as JSON next to the roster
//! save so later commands work without the network.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use roster_core::{Catalog, CatalogError, CatalogSource};

pub const CATALOG_CACHE_FILE: &str = "catalog.json";

#[derive(Debug, Clone)]
pub struct CatalogCache {
    path: PathBuf,
}

impl CatalogCache {
    pub fn in_dir(dir: &Path) -> Self {
        Self { path: dir.join(CATALOG_CACHE_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `Ok(None)` when nothing has been cached yet
    pub fn read(&self) -> Result<Option<Catalog>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read catalog cache: {}", self.path.display()))?;
        let catalog = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse catalog cache: {}", self.path.display()))?;
        Ok(Some(catalog))
    }

    pub fn write(&self, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string(catalog).context("Failed to serialize catalog")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write catalog cache: {}", self.path.display()))?;

        log::debug!("Cached {} players to {}", catalog.players.len(), self.path.display());
        Ok(())
    }
}

impl CatalogSource for CatalogCache {
    fn fetch(&self) -> Result<Catalog, CatalogError> {
        let json = fs::read_to_string(&self.path)
            .map_err(|e| CatalogError::Network(format!("{}: {}", self.path.display(), e)))?;
        Ok(serde_json::from_str(&json)?)
    }
}
