//! Roster CLI Library
//!
//! Marketplace client, local catalog cache and text rendering for the
//! `roster` command.

pub mod cache;
pub mod fetch;
pub mod render;

use anyhow::Result;

use roster_core::{Catalog, RosterConfig, RosterSession, RosterState, SaveManager};

pub use cache::{CatalogCache, CATALOG_CACHE_FILE};
pub use fetch::HttpCatalog;
pub use render::{describe_outcome, render_market, render_roster};

/// File-backed store for the configured save location
pub fn save_manager(config: &RosterConfig) -> SaveManager {
    SaveManager::new(config.save_dir.clone()).with_file_name(config.save_file.clone())
}

/// Session over the saved roster with `catalog` attached for lookups.
/// Attaching the catalog is not a roster change and is not saved.
pub fn open_session(config: &RosterConfig, catalog: Catalog) -> RosterSession<SaveManager> {
    let initial = RosterState { catalog: catalog.players, clubs: catalog.clubs, ..RosterState::new() };
    RosterSession::open_with(save_manager(config), initial)
}

/// Session that never touches the network. Uses the cached catalog unless
/// `offline`; without one the built-in catalog applies and a missing save
/// starts from the built-in squad.
pub fn open_local_session(config: &RosterConfig, offline: bool) -> Result<RosterSession<SaveManager>> {
    let cache = CatalogCache::in_dir(&config.save_dir);
    let cached = if offline { None } else { cache.read()? };

    match cached {
        Some(catalog) => Ok(open_session(config, catalog)),
        None => {
            log::info!("No cached catalog at {}; using built-in players", cache.path().display());
            Ok(RosterSession::open_with_fallback(save_manager(config)))
        }
    }
}
