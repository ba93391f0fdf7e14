//! Athlete catalog: what the marketplace offers and how the roster gets its
//! first players.

pub mod fallback;
pub mod market;
pub mod upstream;

pub use fallback::{fallback_catalog, StaticCatalog};
pub use market::{default_squad, DefaultSquad, MarketFilter};
pub use upstream::{parse_market, MarketResponse, PROBABLE_STATUS_ID};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Club, Player};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub players: Vec<Player>,
    pub clubs: Vec<Club>,
}

impl Catalog {
    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Marketplace returned HTTP {status}")]
    Status { status: u16 },

    #[error("Failed to parse marketplace response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog comes from. One call is one load cycle.
pub trait CatalogSource {
    fn fetch(&self) -> Result<Catalog, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = CatalogError::Status { status: 503 };
        assert_eq!(err.to_string(), "Marketplace returned HTTP 503");
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = StaticCatalog.fetch().unwrap();
        assert_eq!(catalog.player(10).map(|p| p.name.as_str()), Some("Pedro"));
        assert!(catalog.player(1000).is_none());
    }
}
