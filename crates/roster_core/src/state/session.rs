//! Roster session: the one owned roster value of a running application.
//!
//! The session feeds every change through the reducer, replaces its state
//! wholesale with the result and writes accepted changes to its store. The
//! initial hydration from the store is not written back.

use super::{apply, Action, Outcome, RosterState};
use crate::catalog::{default_squad, fallback_catalog, CatalogSource};
use crate::models::Player;
use crate::save::RosterStore;

pub struct RosterSession<S: RosterStore> {
    state: RosterState,
    store: S,
}

impl<S: RosterStore> RosterSession<S> {
    /// Start from an empty roster and hydrate from whatever the store holds.
    pub fn open(store: S) -> Self {
        Self::open_with(store, RosterState::new())
    }

    /// Hydrate `initial` from the store. A missing or rejected payload leaves
    /// `initial` as is.
    pub fn open_with(store: S, initial: RosterState) -> Self {
        let state = Self::restore(&store, &initial).unwrap_or(initial);
        Self { state, store }
    }

    /// Offline start: a store with nothing saved yields the built-in squad
    /// ([`RosterState::with_fallback_roster`]). Saved rosters are restored
    /// with the built-in catalog attached.
    pub fn open_with_fallback(store: S) -> Self {
        let base = RosterState { catalog: fallback_catalog(), ..RosterState::new() };
        let state = match Self::restore(&store, &base) {
            Some(state) => state,
            None => {
                log::info!("No saved roster; starting from the built-in squad");
                RosterState::with_fallback_roster()
            }
        };
        Self { state, store }
    }

    /// `None` when the store holds nothing.
    fn restore(store: &S, initial: &RosterState) -> Option<RosterState> {
        let transition = apply(initial, Action::Hydrate(store.load()?));
        if transition.outcome.is_accepted() {
            log::info!(
                "Restored roster: {} starters, {} on the bench, {}",
                transition.state.filled_slots(),
                transition.state.bench_size(),
                transition.state.formation
            );
        }
        Some(transition.state)
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one action and persist the result if it was accepted.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let transition = apply(&self.state, action);
        self.state = transition.state;

        if transition.outcome.is_accepted() {
            // Best effort; the store logs its own failures
            self.store.save(&self.state);
        }

        transition.outcome
    }

    /// Add a catalog player by id. `None` when the catalog has no such player.
    pub fn add_from_catalog(&mut self, id: u32, to_bench: bool) -> Option<Outcome> {
        let player = self.state.catalog_player(id)?.clone();
        let action = if to_bench { Action::AddToBench(player) } else { Action::AddToLineup(player) };
        Some(self.dispatch(action))
    }

    /// Select `slot` then swap it with `bench_index`.
    pub fn swap(&mut self, slot: usize, bench_index: usize) -> Outcome {
        match self.dispatch(Action::SelectLineupSlot(Some(slot))) {
            Outcome::Accepted => self.dispatch(Action::SwapSelectedWithBench(bench_index)),
            other => other,
        }
    }

    /// One catalog load cycle. A fresh catalog on an empty roster also seeds
    /// the default squad.
    pub fn load_catalog(&mut self, source: &dyn CatalogSource) -> Outcome {
        if self.state.loading {
            log::warn!("Catalog load already in progress");
            return Outcome::Ignored;
        }

        self.dispatch(Action::CatalogLoadStarted);

        match source.fetch() {
            Ok(catalog) => {
                log::info!(
                    "Catalog loaded: {} players, {} clubs",
                    catalog.players.len(),
                    catalog.clubs.len()
                );
                let outcome = self.dispatch(Action::CatalogLoadSucceeded {
                    players: catalog.players,
                    clubs: catalog.clubs,
                });

                if self.state.filled_slots() == 0 && self.state.bench.is_empty() {
                    self.seed_default_squad();
                }
                outcome
            }
            Err(e) => {
                log::warn!("Catalog load failed: {}", e);
                self.dispatch(Action::CatalogLoadFailed(e.to_string()))
            }
        }
    }

    /// Place the best-rated catalog players through the regular add actions,
    /// so slot assignment follows the current formation.
    pub fn seed_default_squad(&mut self) -> usize {
        let squad = default_squad(&self.state.catalog);
        let placements: Vec<Action> = squad
            .starters
            .into_iter()
            .map(Action::AddToLineup)
            .chain(squad.bench.into_iter().map(Action::AddToBench))
            .collect();

        let placed = placements
            .into_iter()
            .map(|action| self.dispatch(action))
            .filter(Outcome::is_accepted)
            .count();

        log::info!("Seeded default squad with {} players", placed);
        placed
    }

    /// Empty the roster and forget the saved copy.
    pub fn reset(&mut self) {
        self.dispatch(Action::ClearRoster);
        self.store.clear();
    }

    pub fn roster_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.state.lineup.players().chain(self.state.bench.iter())
    }
}
