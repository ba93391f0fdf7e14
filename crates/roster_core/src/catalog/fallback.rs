use super::{Catalog, CatalogError, CatalogSource};
use crate::models::{Player, Position};

// (position, name, rating, price); listed in 4-3-3 slot order for the first 11
const FALLBACK_PLAYERS: &[(Position, &str, f64, f64)] = &[
    (Position::Goalkeeper, "Cássio", 7.2, 6.8),
    (Position::Fullback, "Kaiki", 6.5, 5.2),
    (Position::Defender, "Leo Ortiz", 7.2, 5.8),
    (Position::Defender, "Fabrício Bruno", 6.8, 7.5),
    (Position::Fullback, "Alex Sandro", 6.3, 4.2),
    (Position::DefensiveMid, "Matheus Henrique", 7.1, 7.5),
    (Position::Midfielder, "Arrascaeta", 8.1, 18.4),
    (Position::Midfielder, "Matheus Pereira", 8.3, 19.2),
    (Position::Forward, "Kaio Jorge", 6.7, 17.9),
    (Position::Forward, "Pedro", 8.5, 16.8),
    (Position::Forward, "Juninho Xé", 7.0, 8.3),
    (Position::Goalkeeper, "Rossi", 6.5, 5.0),
    (Position::Defender, "David Luiz", 6.2, 4.5),
    (Position::Midfielder, "Gerson", 7.5, 12.3),
    (Position::Forward, "Gabigol", 7.8, 15.5),
];

/// Built-in catalog used when neither the network nor a save is available.
/// Ids run 1..=15 in listing order.
pub fn fallback_catalog() -> Vec<Player> {
    FALLBACK_PLAYERS
        .iter()
        .zip(1u32..)
        .map(|(&(position, name, rating, price), id)| {
            Player::new(id, position, name).with_rating(rating).with_price(price)
        })
        .collect()
}

/// Offline catalog source backed by [`fallback_catalog`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalog;

impl CatalogSource for StaticCatalog {
    fn fetch(&self) -> Result<Catalog, CatalogError> {
        Ok(Catalog { players: fallback_catalog(), clubs: Vec::new() })
    }
}
