use std::cmp::Ordering;

use crate::models::{Player, Position};

fn by_rating_desc(a: &Player, b: &Player) -> Ordering {
    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
}

/// Market browsing filter. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketFilter {
    pub position: Option<Position>,
    pub club_id: Option<u32>,
    /// Case-insensitive substring of the player name
    pub search: Option<String>,
}

impl MarketFilter {
    pub fn matches(&self, player: &Player) -> bool {
        if self.position.is_some_and(|pos| pos != player.position) {
            return false;
        }
        if self.club_id.is_some_and(|club| club != player.club_id) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                player.name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }

    /// Matching players, best rating first. Ties keep catalog order.
    pub fn apply<'a>(&self, players: &'a [Player]) -> Vec<&'a Player> {
        let mut found: Vec<&Player> = players.iter().filter(|p| self.matches(p)).collect();
        found.sort_by(|a, b| by_rating_desc(a, b));
        found
    }
}

/// Starting roster picked from a freshly loaded catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultSquad {
    pub starters: Vec<Player>,
    pub bench: Vec<Player>,
}

/// Best-rated players per line for a 4-3-3: 1 goalkeeper, 2 fullbacks,
/// 2 defenders, 3 midfielders and 3 forwards start; one more goalkeeper,
/// defender, midfielder and forward go to the bench. Lines with too few
/// players simply contribute fewer.
pub fn default_squad(players: &[Player]) -> DefaultSquad {
    let ranked = |wanted: fn(&Position) -> bool| -> Vec<Player> {
        let mut pool: Vec<Player> = players.iter().filter(|p| wanted(&p.position)).cloned().collect();
        pool.sort_by(by_rating_desc);
        pool
    };

    let keepers = ranked(|p| *p == Position::Goalkeeper);
    let fullbacks = ranked(|p| *p == Position::Fullback);
    let defenders = ranked(|p| *p == Position::Defender);
    let midfielders = ranked(Position::is_midfield);
    let forwards = ranked(|p| *p == Position::Forward);

    let take = |pool: &[Player], from: usize, to: usize| -> Vec<Player> {
        pool.iter().skip(from).take(to.saturating_sub(from)).cloned().collect()
    };

    let mut squad = DefaultSquad::default();
    squad.starters.extend(take(&keepers, 0, 1));
    squad.starters.extend(take(&fullbacks, 0, 2));
    squad.starters.extend(take(&defenders, 0, 2));
    squad.starters.extend(take(&midfielders, 0, 3));
    squad.starters.extend(take(&forwards, 0, 3));

    squad.bench.extend(take(&keepers, 1, 2));
    squad.bench.extend(take(&defenders, 2, 3));
    squad.bench.extend(take(&midfielders, 3, 4));
    squad.bench.extend(take(&forwards, 3, 4));

    squad
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback_catalog;

    #[test]
    fn test_filter_by_position_sorted_by_rating() {
        let catalog = fallback_catalog();
        let filter = MarketFilter { position: Some(Position::Forward), ..Default::default() };

        let names: Vec<&str> = filter.apply(&catalog).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pedro", "Gabigol", "Juninho Xé", "Kaio Jorge"]);
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let catalog = fallback_catalog();
        let filter = MarketFilter { search: Some("MATHEUS".to_string()), ..Default::default() };
        assert_eq!(filter.apply(&catalog).len(), 2);
    }

    #[test]
    fn test_filter_by_club() {
        let catalog = vec![
            Player::new(1, Position::Forward, "A").with_club(262, "Flamengo"),
            Player::new(2, Position::Forward, "B").with_club(263, "Botafogo"),
        ];
        let filter = MarketFilter { club_id: Some(263), ..Default::default() };
        assert_eq!(filter.apply(&catalog).iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let catalog = fallback_catalog();
        assert_eq!(MarketFilter::default().apply(&catalog).len(), catalog.len());
    }

    #[test]
    fn test_default_squad_from_fallback() {
        let squad = default_squad(&fallback_catalog());

        assert_eq!(squad.starters.len(), 11);
        assert_eq!(squad.starters[0].name, "Cássio");

        let bench: Vec<&str> = squad.bench.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bench, vec!["Rossi", "David Luiz", "Matheus Henrique", "Kaio Jorge"]);
    }

    #[test]
    fn test_default_squad_with_short_pool() {
        let players = vec![Player::new(1, Position::Forward, "Solo")];
        let squad = default_squad(&players);
        assert_eq!(squad.starters.len(), 1);
        assert!(squad.bench.is_empty());
    }
}
