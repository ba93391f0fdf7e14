//! # roster_core - Fantasy Football Roster Engine
//!
//! Keeps a fantasy-football squad of eleven starters plus a bench, arranged
//! in one of a few fixed formations.
//!
//! ## Features
//! - Position compatibility and per-formation slot maps
//! - Automatic slot assignment for new starters
//! - Pure lineup/bench state machine with fail-closed hydration
//! - Marketplace catalog mapping with an offline fallback
//! - Compressed, checksummed roster saves

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod save;
pub mod state;
pub mod tactics;

pub use catalog::{Catalog, CatalogError, CatalogSource, MarketFilter, StaticCatalog};
pub use config::{ConfigError, RosterConfig};
pub use error::{HydrateError, Notice};
pub use models::{Club, Player, Position};
pub use save::{MemoryStore, RosterStore, SaveError, SaveManager};
pub use state::{apply, Action, Outcome, RosterSession, RosterState, Transition};
pub use tactics::{compatible, first_compatible_vacancy, Formation, Line, LINEUP_SIZE};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_session_end_to_end() {
        let mut session = RosterSession::open(MemoryStore::new());
        assert!(session.load_catalog(&StaticCatalog).is_accepted());
        assert_eq!(session.state().filled_slots(), LINEUP_SIZE);

        // Pedro (id 10) was seeded; adding him again is refused
        let outcome = session.add_from_catalog(10, true);
        assert!(matches!(outcome, Some(Outcome::Rejected(Notice::AlreadyRostered { id: 10, .. }))));

        // the saved payload hydrates into an identical roster
        let payload = session.store().load().unwrap();
        let restored = apply(&RosterState::new(), Action::Hydrate(payload)).state;
        assert_eq!(restored.lineup, session.state().lineup);
        assert_eq!(restored.bench, session.state().bench);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
