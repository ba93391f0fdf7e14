use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Athlete as offered by the marketplace and held on the roster.
///
/// Identity is `id`. Two values with the same id are the same athlete even if
/// the other fields differ (e.g. a refreshed rating after a catalog reload).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub position: Position,
    pub name: String,

    /// Average score; unbounded, may be negative.
    #[serde(default)]
    pub rating: f64,

    /// Market price, only used for aggregate display.
    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub club_id: u32,

    #[serde(default)]
    pub club_name: String,
}

impl Player {
    pub fn new(id: u32, position: Position, name: impl Into<String>) -> Self {
        Self {
            id,
            position,
            name: name.into(),
            rating: 0.0,
            price: 0.0,
            club_id: 0,
            club_name: String::new(),
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_club(mut self, club_id: u32, club_name: impl Into<String>) -> Self {
        self.club_id = club_id;
        self.club_name = club_name.into();
        self
    }
}

/// Playing position. Serialized with the marketplace abbreviations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    #[serde(rename = "GOL")]
    Goalkeeper,
    #[serde(rename = "LAT")]
    Fullback,
    #[serde(rename = "ZAG")]
    Defender,
    #[serde(rename = "VOL")]
    DefensiveMid,
    #[serde(rename = "MEI")]
    Midfielder,
    #[serde(rename = "ATA")]
    Forward,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Goalkeeper,
        Position::Fullback,
        Position::Defender,
        Position::DefensiveMid,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Decode the marketplace `posicao_id`.
    ///
    /// Codes 1..=5 map directly; 6 is the coaching staff slot, which the
    /// roster treats as a midfielder.
    pub fn from_upstream_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Fullback),
            3 => Some(Position::Defender),
            4 => Some(Position::Midfielder),
            5 => Some(Position::Forward),
            6 => Some(Position::Midfielder),
            _ => None,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GOL",
            Position::Fullback => "LAT",
            Position::Defender => "ZAG",
            Position::DefensiveMid => "VOL",
            Position::Midfielder => "MEI",
            Position::Forward => "ATA",
        }
    }

    pub fn is_midfield(&self) -> bool {
        matches!(self, Position::DefensiveMid | Position::Midfielder)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GOL" | "GK" | "GOALKEEPER" => Ok(Position::Goalkeeper),
            "LAT" | "FB" | "FULLBACK" => Ok(Position::Fullback),
            "ZAG" | "CB" | "DEFENDER" => Ok(Position::Defender),
            "VOL" | "DM" | "DEFENSIVE_MID" => Ok(Position::DefensiveMid),
            "MEI" | "MF" | "MIDFIELDER" => Ok(Position::Midfielder),
            "ATA" | "FW" | "FORWARD" => Ok(Position::Forward),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// Club metadata from the marketplace. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Club {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_serializes_as_abbreviation() {
        let json = serde_json::to_string(&Position::DefensiveMid).unwrap();
        assert_eq!(json, "\"VOL\"");

        let parsed: Position = serde_json::from_str("\"ATA\"").unwrap();
        assert_eq!(parsed, Position::Forward);
    }

    #[test]
    fn test_upstream_codes() {
        assert_eq!(Position::from_upstream_code(1), Some(Position::Goalkeeper));
        assert_eq!(Position::from_upstream_code(4), Some(Position::Midfielder));
        // coach folded into midfield
        assert_eq!(Position::from_upstream_code(6), Some(Position::Midfielder));
        assert_eq!(Position::from_upstream_code(0), None);
        assert_eq!(Position::from_upstream_code(7), None);
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("zag".parse::<Position>(), Ok(Position::Defender));
        assert_eq!("Forward".parse::<Position>(), Ok(Position::Forward));
        assert!("striker".parse::<Position>().is_err());
    }

    #[test]
    fn test_player_defaults_optional_fields() {
        let player: Player =
            serde_json::from_str(r#"{"id": 9, "position": "MEI", "name": "Gerson"}"#).unwrap();

        assert_eq!(player.id, 9);
        assert_eq!(player.rating, 0.0);
        assert!(player.club_name.is_empty());
    }
}
