use crate::models::Player;
use crate::tactics::LINEUP_SIZE;
use serde::{Deserialize, Serialize};

/// The starting eleven: a fixed array of slots, each empty or holding one
/// player. Index is the slot identity, so removal leaves a hole instead of
/// shifting later players.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineup {
    slots: [Option<Player>; LINEUP_SIZE],
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a possibly short list of slots, padding with vacancies.
    /// Returns `None` when more than eleven slots are supplied.
    pub fn from_slots(slots: Vec<Option<Player>>) -> Option<Self> {
        if slots.len() > LINEUP_SIZE {
            return None;
        }

        let mut lineup = Self::new();
        for (idx, slot) in slots.into_iter().enumerate() {
            lineup.slots[idx] = slot;
        }
        Some(lineup)
    }

    pub fn get(&self, index: usize) -> Option<&Player> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Replace the content of a slot, returning what was there. Out-of-range
    /// indices are ignored and return `None`.
    pub fn set(&mut self, index: usize, player: Option<Player>) -> Option<Player> {
        match self.slots.get_mut(index) {
            Some(slot) => std::mem::replace(slot, player),
            None => None,
        }
    }

    pub fn take(&mut self, index: usize) -> Option<Player> {
        self.set(index, None)
    }

    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Player>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.slots.iter().flatten()
    }

    pub fn filled(&self) -> usize {
        self.players().count()
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.players().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        LINEUP_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;

    #[test]
    fn test_new_lineup_is_all_vacant() {
        let lineup = Lineup::new();
        assert_eq!(lineup.len(), 11);
        assert_eq!(lineup.filled(), 0);
        assert!((0..11).all(|idx| lineup.is_vacant(idx)));
        assert!(!lineup.is_vacant(11));
    }

    #[test]
    fn test_take_leaves_hole() {
        let mut lineup = Lineup::new();
        lineup.set(3, Some(Player::new(1, Position::Defender, "A")));
        lineup.set(4, Some(Player::new(2, Position::Fullback, "B")));

        let removed = lineup.take(3);
        assert_eq!(removed.map(|p| p.id), Some(1));
        assert!(lineup.is_vacant(3));
        assert_eq!(lineup.get(4).map(|p| p.id), Some(2));
    }

    #[test]
    fn test_from_slots_pads_and_rejects_overflow() {
        let lineup = Lineup::from_slots(vec![Some(Player::new(1, Position::Goalkeeper, "GK"))])
            .unwrap();
        assert_eq!(lineup.filled(), 1);
        assert!(lineup.is_vacant(10));

        assert!(Lineup::from_slots(vec![None; 12]).is_none());
    }

    #[test]
    fn test_serializes_as_eleven_entries() {
        let value = serde_json::to_value(Lineup::new()).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(11));
    }
}
