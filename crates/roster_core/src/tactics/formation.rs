// crates/roster_core/src/tactics/formation.rs
// Formation catalogue: slot map (which positions each lineup index accepts)
// and the display-row partition used by front-ends.

use crate::models::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Number of lineup slots in every formation.
pub const LINEUP_SIZE: usize = 11;

/// Positions accepted by one lineup slot.
pub type SlotDefinition = &'static [Position];

/// Ordered slot definitions for a formation; index i governs lineup index i.
pub type SlotMap = [SlotDefinition; LINEUP_SIZE];

const GK: SlotDefinition = &[Position::Goalkeeper];
const FB: SlotDefinition = &[Position::Fullback];
const CB: SlotDefinition = &[Position::Defender];
const MID: SlotDefinition = &[Position::Midfielder, Position::DefensiveMid];
const WING_BACK: SlotDefinition =
    &[Position::Fullback, Position::Midfielder, Position::DefensiveMid];
const FWD: SlotDefinition = &[Position::Forward];

const SLOTS_433: SlotMap = [GK, FB, CB, CB, FB, MID, MID, MID, FWD, FWD, FWD];
const SLOTS_442: SlotMap = [GK, FB, CB, CB, FB, MID, MID, MID, MID, FWD, FWD];
const SLOTS_352: SlotMap = [GK, CB, CB, CB, WING_BACK, MID, MID, MID, WING_BACK, FWD, FWD];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Formation {
    #[default]
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "3-5-2")]
    F352,
}

impl Formation {
    /// Formations offered by the selector, in display order.
    pub const ALL: [Formation; 3] = [Formation::F433, Formation::F442, Formation::F352];

    pub fn name(&self) -> &'static str {
        match self {
            Formation::F433 => "4-3-3",
            Formation::F442 => "4-4-2",
            Formation::F352 => "3-5-2",
        }
    }

    /// Strict lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name.trim())
    }

    /// Lenient lookup: anything unrecognized becomes 4-3-3.
    pub fn parse_or_default(name: &str) -> Self {
        Self::from_name(name).unwrap_or_default()
    }

    pub fn slot_map(&self) -> &'static SlotMap {
        match self {
            Formation::F433 => &SLOTS_433,
            Formation::F442 => &SLOTS_442,
            Formation::F352 => &SLOTS_352,
        }
    }

    /// Whether lineup index `index` accepts `position`. Out-of-range indices
    /// accept nothing.
    pub fn accepts(&self, index: usize, position: Position) -> bool {
        self.slot_map()
            .get(index)
            .is_some_and(|slot| slot.contains(&position))
    }

    /// Display rows, goalkeeper first. Rows are contiguous and cover every
    /// lineup index exactly once.
    pub fn rows(&self) -> [FormationRow; 4] {
        let (defense, midfield, attack) = match self {
            Formation::F433 => (1..=4, 5..=7, 8..=10),
            Formation::F442 => (1..=4, 5..=8, 9..=10),
            Formation::F352 => (1..=3, 4..=8, 9..=10),
        };

        [
            FormationRow { line: Line::Goalkeeper, slots: 0..=0 },
            FormationRow { line: Line::Defense, slots: defense },
            FormationRow { line: Line::Midfield, slots: midfield },
            FormationRow { line: Line::Attack, slots: attack },
        ]
    }
}

/// Free function form of [`Formation::slot_map`].
pub fn slot_map(formation: Formation) -> &'static SlotMap {
    formation.slot_map()
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Formation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Invalid formation: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
}

impl Line {
    pub fn label(&self) -> &'static str {
        match self {
            Line::Goalkeeper => "Goalkeeper",
            Line::Defense => "Defense",
            Line::Midfield => "Midfield",
            Line::Attack => "Attack",
        }
    }
}

/// One display row of the pitch. Presentation only; slot legality never
/// looks at rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormationRow {
    pub line: Line,
    pub slots: RangeInclusive<usize>,
}

impl FormationRow {
    pub fn len(&self) -> usize {
        self.slots.clone().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
