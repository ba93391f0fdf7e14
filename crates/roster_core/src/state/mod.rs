//! Roster State Machine
//!
//! `RosterState` is the single roster value of the application. It is never
//! mutated in place by callers: every change goes through [`apply`], which
//! takes the current state and an [`Action`] and returns a fresh state plus an
//! [`Outcome`]. A refused action yields an unchanged copy of the input, so
//! readers always see a state where
//!
//! - the lineup has exactly 11 slots,
//! - no player id appears twice across lineup and bench,
//! - the selection, if any, is a valid lineup index,
//! - the formation is one of the known formations.

pub mod hydrate;
pub mod lineup;
pub mod session;

pub use hydrate::RosterPatch;
pub use lineup::Lineup;
pub use session::RosterSession;

use serde_json::Value;

use crate::catalog::fallback_catalog;
use crate::error::{HydrateError, Notice};
use crate::models::{Club, Player};
use crate::tactics::{compatible, first_compatible_vacancy, occupants_for, Formation, LINEUP_SIZE};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterState {
    /// Starting eleven
    pub lineup: Lineup,

    /// Substitutes, in insertion order
    pub bench: Vec<Player>,

    /// Lineup slot picked for a pending swap
    pub selected: Option<usize>,

    pub formation: Formation,

    /// Everything the marketplace offers
    pub catalog: Vec<Player>,

    pub clubs: Vec<Club>,

    /// A catalog request is outstanding
    pub loading: bool,

    /// Last catalog failure, shown to the user
    pub error: Option<String>,
}

impl RosterState {
    /// Empty roster in 4-3-3 with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster pre-filled from the built-in catalog: the first eleven start,
    /// the rest sit on the bench.
    pub fn with_fallback_roster() -> Self {
        let catalog = fallback_catalog();
        let mut players = catalog.clone().into_iter();

        let starters: Vec<Option<Player>> = players.by_ref().take(LINEUP_SIZE).map(Some).collect();
        let lineup = Lineup::from_slots(starters).unwrap_or_default();

        Self {
            lineup,
            bench: players.collect(),
            catalog,
            ..Self::default()
        }
    }

    pub fn is_rostered(&self, id: u32) -> bool {
        self.lineup.contains_id(id) || self.bench.iter().any(|p| p.id == id)
    }

    pub fn filled_slots(&self) -> usize {
        self.lineup.filled()
    }

    pub fn bench_size(&self) -> usize {
        self.bench.len()
    }

    pub fn total_rating(&self) -> f64 {
        self.lineup.players().map(|p| p.rating).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.lineup.players().map(|p| p.price).sum()
    }

    pub fn catalog_player(&self, id: u32) -> Option<&Player> {
        self.catalog.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pick (or clear) the lineup slot for the next swap
    SelectLineupSlot(Option<usize>),

    SetFormation(Formation),

    /// Formation by display name, as sent by a front-end; unknown names are
    /// ignored
    SetFormationNamed(String),

    /// Exchange the selected starter with a bench player
    SwapSelectedWithBench(usize),

    AddToLineup(Player),

    AddToBench(Player),

    RemoveFromLineup(usize),

    RemoveFromBench(usize),

    /// Merge a stored or externally supplied payload
    Hydrate(Value),

    CatalogLoadStarted,

    CatalogLoadSucceeded { players: Vec<Player>, clubs: Vec<Club> },

    CatalogLoadFailed(String),

    /// Empty lineup and bench
    ClearRoster,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted,

    /// Precondition not met; nothing to report to the user
    Ignored,

    /// Refused with a message for the user
    Rejected(Notice),

    /// Hydration payload failed validation
    Malformed(HydrateError),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted)
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Rejected(notice) => Some(notice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: RosterState,
    pub outcome: Outcome,
}

impl Transition {
    fn accepted(state: RosterState) -> Self {
        Self { state, outcome: Outcome::Accepted }
    }

    fn unchanged(state: &RosterState, outcome: Outcome) -> Self {
        Self { state: state.clone(), outcome }
    }
}

/// Apply one action. Pure: the input is never modified and the returned state
/// satisfies every roster invariant.
pub fn apply(state: &RosterState, action: Action) -> Transition {
    match action {
        Action::SelectLineupSlot(selected) => select_slot(state, selected),
        Action::SetFormation(formation) => set_formation(state, formation),
        Action::SetFormationNamed(name) => match Formation::from_name(&name) {
            Some(formation) => set_formation(state, formation),
            None => {
                log::debug!("Ignoring unknown formation '{}'", name);
                Transition::unchanged(state, Outcome::Ignored)
            }
        },
        Action::SwapSelectedWithBench(bench_index) => swap_with_bench(state, bench_index),
        Action::AddToLineup(player) => add_to_lineup(state, player),
        Action::AddToBench(player) => add_to_bench(state, player),
        Action::RemoveFromLineup(index) => remove_from_lineup(state, index),
        Action::RemoveFromBench(index) => remove_from_bench(state, index),
        Action::Hydrate(payload) => hydrate(state, &payload),
        Action::CatalogLoadStarted => {
            let mut next = state.clone();
            next.loading = true;
            next.error = None;
            Transition::accepted(next)
        }
        Action::CatalogLoadSucceeded { players, clubs } => {
            let mut next = state.clone();
            next.catalog = players;
            next.clubs = clubs;
            next.loading = false;
            next.error = None;
            Transition::accepted(next)
        }
        Action::CatalogLoadFailed(message) => {
            let mut next = state.clone();
            next.loading = false;
            next.error = Some(message);
            Transition::accepted(next)
        }
        Action::ClearRoster => {
            let mut next = state.clone();
            next.lineup = Lineup::new();
            next.bench.clear();
            next.selected = None;
            Transition::accepted(next)
        }
    }
}

fn select_slot(state: &RosterState, selected: Option<usize>) -> Transition {
    if selected.is_some_and(|idx| idx >= LINEUP_SIZE) {
        return Transition::unchanged(state, Outcome::Ignored);
    }

    let mut next = state.clone();
    next.selected = selected;
    Transition::accepted(next)
}

fn set_formation(state: &RosterState, formation: Formation) -> Transition {
    // Placed players keep their index even if the new slot map disagrees.
    let mut next = state.clone();
    next.formation = formation;
    next.selected = None;
    Transition::accepted(next)
}

fn swap_with_bench(state: &RosterState, bench_index: usize) -> Transition {
    let Some(slot) = state.selected else {
        return Transition::unchanged(state, Outcome::Ignored);
    };
    let Some(substitute) = state.bench.get(bench_index) else {
        return Transition::unchanged(state, Outcome::Ignored);
    };

    let allowed = match state.lineup.get(slot) {
        Some(starter) => compatible(starter.position, substitute.position),
        None => state.formation.accepts(slot, substitute.position),
    };
    if !allowed {
        log::debug!(
            "Swap refused: {} cannot take lineup slot {}",
            substitute.position,
            slot
        );
        return Transition::unchanged(state, Outcome::Ignored);
    }

    let mut next = state.clone();
    let incoming = next.bench[bench_index].clone();
    match next.lineup.set(slot, Some(incoming)) {
        Some(outgoing) => next.bench[bench_index] = outgoing,
        None => {
            next.bench.remove(bench_index);
        }
    }
    next.selected = None;
    Transition::accepted(next)
}

fn already_rostered(player: &Player) -> Outcome {
    Outcome::Rejected(Notice::AlreadyRostered { id: player.id, name: player.name.clone() })
}

fn add_to_lineup(state: &RosterState, player: Player) -> Transition {
    if state.is_rostered(player.id) {
        return Transition::unchanged(state, already_rostered(&player));
    }

    match first_compatible_vacancy(player.position, &state.lineup, state.formation) {
        Some(index) => {
            let mut next = state.clone();
            next.lineup.set(index, Some(player));
            Transition::accepted(next)
        }
        None => {
            let notice = Notice::NoCompatibleSlot {
                position: player.position,
                formation: state.formation,
                occupants: occupants_for(player.position, &state.lineup, state.formation),
            };
            log::debug!("{}", notice);
            Transition::unchanged(state, Outcome::Rejected(notice))
        }
    }
}

fn add_to_bench(state: &RosterState, player: Player) -> Transition {
    if state.is_rostered(player.id) {
        return Transition::unchanged(state, already_rostered(&player));
    }

    let mut next = state.clone();
    next.bench.push(player);
    Transition::accepted(next)
}

fn remove_from_lineup(state: &RosterState, index: usize) -> Transition {
    if index >= LINEUP_SIZE {
        return Transition::unchanged(state, Outcome::Ignored);
    }

    let mut next = state.clone();
    next.lineup.take(index);
    next.selected = None;
    Transition::accepted(next)
}

fn remove_from_bench(state: &RosterState, index: usize) -> Transition {
    if index >= state.bench.len() {
        return Transition::unchanged(state, Outcome::Ignored);
    }

    let mut next = state.clone();
    next.bench.remove(index);
    Transition::accepted(next)
}

fn hydrate(state: &RosterState, payload: &Value) -> Transition {
    match RosterPatch::from_value(payload).and_then(|patch| patch.merge_into(state)) {
        Ok(next) => Transition::accepted(next),
        Err(err) => {
            log::warn!("Rejected hydration payload: {}", err);
            Transition::unchanged(state, Outcome::Malformed(err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use serde_json::json;

    fn player(id: u32, position: Position) -> Player {
        Player::new(id, position, format!("Player {}", id)).with_rating(id as f64).with_price(2.0)
    }

    fn run(state: &RosterState, actions: Vec<Action>) -> RosterState {
        actions.into_iter().fold(state.clone(), |acc, action| apply(&acc, action).state)
    }

    #[test]
    fn test_scenario_a_keeper_into_empty_433() {
        let state = RosterState::new();
        let t = apply(&state, Action::AddToLineup(player(1, Position::Goalkeeper)));

        assert!(t.outcome.is_accepted());
        assert_eq!(t.state.lineup.get(0).map(|p| p.id), Some(1));
        assert_eq!(t.state.filled_slots(), 1);
        assert_eq!((0..11).filter(|&i| t.state.lineup.is_vacant(i)).count(), 10);
    }

    #[test]
    fn test_scenario_b_second_keeper_has_no_slot() {
        let state = run(&RosterState::new(), vec![Action::AddToLineup(player(1, Position::Goalkeeper))]);
        let t = apply(&state, Action::AddToLineup(player(2, Position::Goalkeeper)));

        assert_eq!(
            t.outcome,
            Outcome::Rejected(Notice::NoCompatibleSlot {
                position: Position::Goalkeeper,
                formation: Formation::F433,
                occupants: vec!["Player 1".to_string()],
            })
        );
        assert_eq!(t.state, state);
    }

    fn scenario_c_state(bench_position: Position) -> RosterState {
        let mut state = RosterState::new();
        state.lineup.set(5, Some(player(10, Position::Midfielder)));
        state.bench.push(player(20, bench_position));
        state.selected = Some(5);
        state
    }

    #[test]
    fn test_scenario_c_midfield_swap() {
        let state = scenario_c_state(Position::DefensiveMid);
        let t = apply(&state, Action::SwapSelectedWithBench(0));

        assert!(t.outcome.is_accepted());
        assert_eq!(t.state.lineup.get(5).map(|p| p.id), Some(20));
        assert_eq!(t.state.bench[0].id, 10);
        assert_eq!(t.state.selected, None);
    }

    #[test]
    fn test_scenario_d_incompatible_swap_is_noop() {
        let state = scenario_c_state(Position::Forward);
        let t = apply(&state, Action::SwapSelectedWithBench(0));

        assert_eq!(t.outcome, Outcome::Ignored);
        assert_eq!(t.state, state);
        assert_eq!(t.state.selected, Some(5));
    }

    #[test]
    fn test_scenario_e_formation_change_keeps_placements() {
        let mut state = RosterState::with_fallback_roster();
        state.selected = Some(3);

        let t = apply(&state, Action::SetFormation(Formation::F442));

        assert_eq!(t.state.formation, Formation::F442);
        assert_eq!(t.state.selected, None);
        assert_eq!(t.state.lineup, state.lineup);
        assert_eq!(t.state.bench, state.bench);
    }

    #[test]
    fn test_swap_without_selection_is_noop() {
        let mut state = scenario_c_state(Position::Midfielder);
        state.selected = None;

        let t = apply(&state, Action::SwapSelectedWithBench(0));
        assert_eq!(t.outcome, Outcome::Ignored);
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_swap_with_missing_bench_entry_is_noop() {
        let state = scenario_c_state(Position::Midfielder);
        let t = apply(&state, Action::SwapSelectedWithBench(3));
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_swap_into_empty_slot_moves_bench_player() {
        let mut state = RosterState::new();
        state.bench.push(player(7, Position::Forward));
        state.bench.push(player(8, Position::Defender));
        state.selected = Some(9);

        let t = apply(&state, Action::SwapSelectedWithBench(0));
        assert!(t.outcome.is_accepted());
        assert_eq!(t.state.lineup.get(9).map(|p| p.id), Some(7));
        assert_eq!(t.state.bench.iter().map(|p| p.id).collect::<Vec<_>>(), vec![8]);

        // defender cannot fill an attacking slot
        let mut state = t.state;
        state.selected = Some(10);
        let t = apply(&state, Action::SwapSelectedWithBench(0));
        assert_eq!(t.outcome, Outcome::Ignored);
    }

    #[test]
    fn test_duplicate_adds_are_rejected() {
        let state = run(&RosterState::new(), vec![Action::AddToBench(player(4, Position::Forward))]);

        for action in [
            Action::AddToLineup(player(4, Position::Forward)),
            Action::AddToBench(player(4, Position::Forward)),
        ] {
            let t = apply(&state, action);
            assert!(matches!(
                t.outcome,
                Outcome::Rejected(Notice::AlreadyRostered { id: 4, .. })
            ));
            assert_eq!(t.state, state);
        }
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let state = RosterState::new();
        let t = apply(&state, Action::SelectLineupSlot(Some(11)));
        assert_eq!(t.outcome, Outcome::Ignored);
        assert_eq!(t.state.selected, None);
    }

    #[test]
    fn test_select_none_twice_is_idempotent() {
        let mut state = RosterState::with_fallback_roster();
        state.selected = Some(2);

        let once = apply(&state, Action::SelectLineupSlot(None)).state;
        let twice = apply(&once, Action::SelectLineupSlot(None)).state;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_formation_name_ignored() {
        let mut state = RosterState::new();
        state.selected = Some(1);

        let t = apply(&state, Action::SetFormationNamed("5-4-1".to_string()));
        assert_eq!(t.outcome, Outcome::Ignored);
        assert_eq!(t.state.selected, Some(1));

        let t = apply(&state, Action::SetFormationNamed("3-5-2".to_string()));
        assert_eq!(t.state.formation, Formation::F352);
    }

    #[test]
    fn test_remove_from_lineup_preserves_indices() {
        let mut state = RosterState::with_fallback_roster();
        state.selected = Some(6);
        let before_seven = state.lineup.get(7).cloned();

        let t = apply(&state, Action::RemoveFromLineup(6));
        assert!(t.state.lineup.is_vacant(6));
        assert_eq!(t.state.lineup.get(7).cloned(), before_seven);
        assert_eq!(t.state.selected, None);
        assert_eq!(t.state.filled_slots(), 10);

        assert_eq!(apply(&state, Action::RemoveFromLineup(11)).outcome, Outcome::Ignored);
    }

    #[test]
    fn test_remove_from_bench() {
        let state = RosterState::with_fallback_roster();
        let second = state.bench[1].id;

        let t = apply(&state, Action::RemoveFromBench(0));
        assert_eq!(t.state.bench.len(), state.bench.len() - 1);
        assert_eq!(t.state.bench[0].id, second);

        assert_eq!(apply(&state, Action::RemoveFromBench(99)).outcome, Outcome::Ignored);
    }

    #[test]
    fn test_removed_player_can_be_added_again() {
        let state = RosterState::with_fallback_roster();
        let keeper = state.lineup.get(0).cloned().unwrap();

        let state = run(&state, vec![Action::RemoveFromLineup(0)]);
        let t = apply(&state, Action::AddToLineup(keeper.clone()));
        assert!(t.outcome.is_accepted());
        assert_eq!(t.state.lineup.get(0), Some(&keeper));
    }

    #[test]
    fn test_hydrate_merges_valid_payload() {
        let state = RosterState::new();
        let payload = json!({
            "lineup": [{"id": 1, "position": "GOL", "name": "Cássio", "rating": 7.2, "price": 6.8}],
            "formation": "3-5-2",
            "selected": null
        });

        let t = apply(&state, Action::Hydrate(payload));
        assert!(t.outcome.is_accepted());
        assert_eq!(t.state.formation, Formation::F352);
        assert_eq!(t.state.filled_slots(), 1);
    }

    #[test]
    fn test_hydrate_fails_closed() {
        let state = RosterState::with_fallback_roster();
        let payload = json!({
            "lineup": [{"id": 99, "position": "GOL", "name": "New keeper"}],
            "formation": "4-2-4"
        });

        let t = apply(&state, Action::Hydrate(payload));
        assert!(matches!(t.outcome, Outcome::Malformed(HydrateError::InvalidField { field: "formation", .. })));
        assert_eq!(t.state, state);
    }

    #[test]
    fn test_catalog_failure_keeps_roster() {
        let state = RosterState::with_fallback_roster();
        let state = run(&state, vec![Action::CatalogLoadStarted]);
        assert!(state.loading);

        let t = apply(&state, Action::CatalogLoadFailed("HTTP 503".to_string()));
        assert!(!t.state.loading);
        assert_eq!(t.state.error.as_deref(), Some("HTTP 503"));
        assert_eq!(t.state.lineup, state.lineup);
        assert_eq!(t.state.bench, state.bench);
    }

    #[test]
    fn test_catalog_success_replaces_catalog_and_clears_error() {
        let mut state = RosterState::new();
        state.error = Some("old failure".to_string());

        let t = apply(
            &state,
            Action::CatalogLoadSucceeded {
                players: vec![player(1, Position::Forward)],
                clubs: vec![Club { id: 262, name: "Flamengo".to_string(), abbreviation: "FLA".to_string() }],
            },
        );
        assert_eq!(t.state.catalog.len(), 1);
        assert_eq!(t.state.clubs.len(), 1);
        assert!(t.state.error.is_none());
    }

    #[test]
    fn test_aggregates() {
        let state = run(
            &RosterState::new(),
            vec![
                Action::AddToLineup(player(1, Position::Goalkeeper)),
                Action::AddToLineup(player(3, Position::Forward)),
                Action::AddToBench(player(5, Position::Forward)),
            ],
        );

        assert_eq!(state.filled_slots(), 2);
        assert_eq!(state.total_rating(), 4.0);
        assert_eq!(state.total_price(), 4.0);
        assert_eq!(state.bench_size(), 1);
    }

    #[test]
    fn test_fallback_roster_fits_433() {
        let state = RosterState::with_fallback_roster();
        assert_eq!(state.filled_slots(), 11);
        assert_eq!(state.bench.len(), 4);

        for (idx, slot) in state.lineup.iter().enumerate() {
            let player = slot.unwrap();
            assert!(Formation::F433.accepts(idx, player.position), "{} at {}", player.name, idx);
        }
    }

    #[test]
    fn test_clear_roster() {
        let mut state = RosterState::with_fallback_roster();
        state.selected = Some(4);

        let t = apply(&state, Action::ClearRoster);
        assert_eq!(t.state.filled_slots(), 0);
        assert!(t.state.bench.is_empty());
        assert_eq!(t.state.selected, None);
        assert_eq!(t.state.catalog, state.catalog);
    }
}
