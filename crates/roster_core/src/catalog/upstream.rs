//! Marketplace response mapping.
//!
//! The marketplace returns every athlete it knows about together with club
//! and position tables. Only athletes whose status marks them as probable
//! starters are kept.

use serde::Deserialize;
use std::collections::HashMap;

use super::{Catalog, CatalogError};
use crate::models::{Club, Player, Position};

/// `status_id` of athletes expected to play the next round.
pub const PROBABLE_STATUS_ID: u32 = 7;

#[derive(Debug, Clone, Deserialize)]
pub struct MarketResponse {
    #[serde(default)]
    pub atletas: Vec<MarketAthlete>,
    #[serde(default)]
    pub clubes: HashMap<String, MarketClub>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketAthlete {
    pub atleta_id: u32,
    pub apelido: String,
    #[serde(default)]
    pub clube_id: u32,
    pub posicao_id: u8,
    #[serde(default)]
    pub status_id: u32,
    #[serde(default)]
    pub media_num: Option<f64>,
    #[serde(default)]
    pub preco_num: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketClub {
    pub id: u32,
    pub nome: String,
    #[serde(default)]
    pub abreviacao: String,
}

impl MarketClub {
    fn to_club(&self) -> Club {
        Club { id: self.id, name: self.nome.clone(), abbreviation: self.abreviacao.clone() }
    }
}

impl MarketAthlete {
    /// Convert into a roster player. Unknown position codes are treated as
    /// midfield, the same bucket the coaching code falls into.
    pub fn to_player(&self, clubs: &HashMap<u32, Club>) -> Player {
        let position = Position::from_upstream_code(self.posicao_id).unwrap_or_else(|| {
            log::debug!(
                "Unknown position code {} for athlete {}, using MEI",
                self.posicao_id,
                self.atleta_id
            );
            Position::Midfielder
        });

        let club_name = clubs.get(&self.clube_id).map(|c| c.name.clone()).unwrap_or_default();

        Player {
            id: self.atleta_id,
            position,
            name: self.apelido.clone(),
            rating: self.media_num.unwrap_or(0.0),
            price: self.preco_num.unwrap_or(0.0),
            club_id: self.clube_id,
            club_name,
        }
    }
}

impl MarketResponse {
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Keep athletes with `probable_status`, resolve club names, and return
    /// clubs sorted by name.
    pub fn into_catalog(self, probable_status: u32) -> Catalog {
        let mut clubs: Vec<Club> = self.clubes.values().map(MarketClub::to_club).collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));

        let by_id: HashMap<u32, Club> = clubs.iter().map(|c| (c.id, c.clone())).collect();

        let total = self.atletas.len();
        let players: Vec<Player> = self
            .atletas
            .iter()
            .filter(|a| a.status_id == probable_status)
            .map(|a| a.to_player(&by_id))
            .collect();

        log::info!(
            "Marketplace returned {} athletes, {} probable, {} clubs",
            total,
            players.len(),
            clubs.len()
        );

        Catalog { players, clubs }
    }
}

/// Parse a raw marketplace body into a catalog.
pub fn parse_market(body: &str, probable_status: u32) -> Result<Catalog, CatalogError> {
    Ok(MarketResponse::from_json(body)?.into_catalog(probable_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> String {
        json!({
            "atletas": [
                {"atleta_id": 1, "apelido": "Rossi", "clube_id": 262, "posicao_id": 1,
                 "status_id": 7, "media_num": 6.5, "preco_num": 5.0, "jogos_num": 10},
                {"atleta_id": 2, "apelido": "Injured", "clube_id": 262, "posicao_id": 5,
                 "status_id": 5, "media_num": 8.0, "preco_num": 12.0},
                {"atleta_id": 3, "apelido": "Tite", "clube_id": 263, "posicao_id": 6,
                 "status_id": 7, "media_num": null, "preco_num": 10.0},
                {"atleta_id": 4, "apelido": "Nobody", "clube_id": 999, "posicao_id": 3,
                 "status_id": 7}
            ],
            "clubes": {
                "262": {"id": 262, "nome": "Flamengo", "abreviacao": "FLA"},
                "263": {"id": 263, "nome": "Botafogo", "abreviacao": "BOT"}
            },
            "posicoes": {"1": {"id": 1, "nome": "Goleiro", "abreviacao": "gol"}}
        })
        .to_string()
    }

    #[test]
    fn test_only_probable_athletes_are_kept() {
        let catalog = parse_market(&body(), PROBABLE_STATUS_ID).unwrap();
        let ids: Vec<u32> = catalog.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_mapping_and_defaults() {
        let catalog = parse_market(&body(), PROBABLE_STATUS_ID).unwrap();

        let rossi = &catalog.players[0];
        assert_eq!(rossi.position, Position::Goalkeeper);
        assert_eq!(rossi.club_name, "Flamengo");
        assert_eq!(rossi.rating, 6.5);

        let coach = &catalog.players[1];
        assert_eq!(coach.position, Position::Midfielder);
        assert_eq!(coach.rating, 0.0);

        let unknown_club = &catalog.players[2];
        assert!(unknown_club.club_name.is_empty());
        assert_eq!(unknown_club.price, 0.0);
    }

    #[test]
    fn test_clubs_sorted_by_name() {
        let catalog = parse_market(&body(), PROBABLE_STATUS_ID).unwrap();
        let names: Vec<&str> = catalog.clubs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Botafogo", "Flamengo"]);
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        assert!(matches!(parse_market("<html>", PROBABLE_STATUS_ID), Err(CatalogError::Parse(_))));
    }
}
