//! Hydration payload validation.
//!
//! A payload is a loosely-typed JSON object (typically read back from
//! storage). Each recognised field is type-checked on its own, then the merged
//! roster is checked for duplicate players. A single failure rejects the whole
//! payload; there is no partial merge.

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::lineup::Lineup;
use super::RosterState;
use crate::error::HydrateError;
use crate::models::Player;
use crate::tactics::{Formation, LINEUP_SIZE};

pub const FIELD_LINEUP: &str = "lineup";
pub const FIELD_BENCH: &str = "bench";
pub const FIELD_SELECTED: &str = "selected";
pub const FIELD_FORMATION: &str = "formation";

/// Validated subset of roster fields. `None` means "not present in the
/// payload, keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterPatch {
    pub lineup: Option<Lineup>,
    pub bench: Option<Vec<Player>>,
    pub selected: Option<Option<usize>>,
    pub formation: Option<Formation>,
}

impl RosterPatch {
    pub fn from_value(value: &Value) -> Result<Self, HydrateError> {
        let object = value.as_object().ok_or(HydrateError::NotAnObject)?;

        Ok(Self {
            lineup: field(object, FIELD_LINEUP).map(parse_lineup).transpose()?,
            bench: field(object, FIELD_BENCH).map(parse_bench).transpose()?,
            selected: field(object, FIELD_SELECTED).map(parse_selected).transpose()?,
            formation: field(object, FIELD_FORMATION).map(parse_formation).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lineup.is_none()
            && self.bench.is_none()
            && self.selected.is_none()
            && self.formation.is_none()
    }

    /// Shallow-merge into a copy of `state`. Fails if the merged roster holds
    /// the same player twice.
    pub fn merge_into(self, state: &RosterState) -> Result<RosterState, HydrateError> {
        let mut next = state.clone();

        if let Some(lineup) = self.lineup {
            next.lineup = lineup;
        }
        if let Some(bench) = self.bench {
            next.bench = bench;
        }
        if let Some(selected) = self.selected {
            next.selected = selected;
        }
        if let Some(formation) = self.formation {
            next.formation = formation;
        }

        ensure_unique(&next)?;
        Ok(next)
    }
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name)
}

fn parse_player(field: &'static str, value: &Value) -> Result<Player, HydrateError> {
    serde_json::from_value(value.clone()).map_err(|e| HydrateError::invalid(field, e.to_string()))
}

fn parse_lineup(value: &Value) -> Result<Lineup, HydrateError> {
    let entries = value
        .as_array()
        .ok_or_else(|| HydrateError::invalid(FIELD_LINEUP, "expected an array"))?;

    if entries.len() > LINEUP_SIZE {
        return Err(HydrateError::invalid(
            FIELD_LINEUP,
            format!("expected at most {} slots, found {}", LINEUP_SIZE, entries.len()),
        ));
    }

    let slots = entries
        .iter()
        .map(|entry| match entry {
            Value::Null => Ok(None),
            other => parse_player(FIELD_LINEUP, other).map(Some),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Lineup::from_slots(slots).ok_or_else(|| HydrateError::invalid(FIELD_LINEUP, "too many slots"))
}

fn parse_bench(value: &Value) -> Result<Vec<Player>, HydrateError> {
    value
        .as_array()
        .ok_or_else(|| HydrateError::invalid(FIELD_BENCH, "expected an array"))?
        .iter()
        .map(|entry| parse_player(FIELD_BENCH, entry))
        .collect()
}

fn parse_selected(value: &Value) -> Result<Option<usize>, HydrateError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_u64() {
            Some(idx) if idx < LINEUP_SIZE as u64 => Ok(Some(idx as usize)),
            _ => Err(HydrateError::invalid(
                FIELD_SELECTED,
                format!("{} is not a lineup index", n),
            )),
        },
        _ => Err(HydrateError::invalid(FIELD_SELECTED, "expected null or an index")),
    }
}

fn parse_formation(value: &Value) -> Result<Formation, HydrateError> {
    value
        .as_str()
        .and_then(Formation::from_name)
        .ok_or_else(|| HydrateError::invalid(FIELD_FORMATION, format!("unknown formation {}", value)))
}

fn ensure_unique(state: &RosterState) -> Result<(), HydrateError> {
    let mut seen = HashSet::new();
    for player in state.lineup.players().chain(state.bench.iter()) {
        if !seen.insert(player.id) {
            return Err(HydrateError::DuplicatePlayer { id: player.id });
        }
    }
    Ok(())
}
