use super::formation::{Formation, LINEUP_SIZE};
use crate::models::Position;
use crate::state::Lineup;

/// First lineup index (in formation order) that is empty and accepts
/// `position`. `None` is an ordinary answer, not an error.
pub fn first_compatible_vacancy(
    position: Position,
    lineup: &Lineup,
    formation: Formation,
) -> Option<usize> {
    let slots = formation.slot_map();
    (0..LINEUP_SIZE).find(|&idx| lineup.is_vacant(idx) && slots[idx].contains(&position))
}

/// Names of the players currently sitting in slots that accept `position`,
/// in slot order. Used to explain a failed placement.
pub fn occupants_for(position: Position, lineup: &Lineup, formation: Formation) -> Vec<String> {
    let slots = formation.slot_map();
    lineup
        .iter()
        .enumerate()
        .filter(|(idx, _)| slots[*idx].contains(&position))
        .filter_map(|(_, slot)| slot.map(|player| player.name.clone()))
        .collect()
}
