//! Plain-text views of the roster and the market.

use std::fmt::Write;

use roster_core::{Outcome, Player, RosterState};

fn slot_label(state: &RosterState, index: usize) -> String {
    state.formation.slot_map()[index]
        .iter()
        .map(|p| p.abbreviation())
        .collect::<Vec<_>>()
        .join("/")
}

fn player_line(player: &Player) -> String {
    let mut line = format!("{} {} ({:.1}, C$ {:.2})", player.position, player.name, player.rating, player.price);
    if !player.club_name.is_empty() {
        let _ = write!(line, " - {}", player.club_name);
    }
    line
}

/// Pitch rows goalkeeper first, then the bench and the totals. The selected
/// slot is marked with `*`.
pub fn render_roster(state: &RosterState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Formation {}", state.formation);

    for row in state.formation.rows() {
        let _ = writeln!(out, "{}:", row.line.label());
        for index in row.slots {
            let marker = if state.selected == Some(index) { '*' } else { ' ' };
            let _ = match state.lineup.get(index) {
                Some(player) => writeln!(out, " {}[{:>2}] {}", marker, index, player_line(player)),
                None => writeln!(out, " {}[{:>2}] -- empty {} --", marker, index, slot_label(state, index)),
            };
        }
    }

    let _ = writeln!(out, "Bench:");
    if state.bench.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for (index, player) in state.bench.iter().enumerate() {
        let _ = writeln!(out, "  [{:>2}] {}", index, player_line(player));
    }

    let _ = writeln!(
        out,
        "Starters {}/{}  rating {:.1}  price C$ {:.2}",
        state.filled_slots(),
        state.lineup.len(),
        state.total_rating(),
        state.total_price()
    );

    if let Some(error) = &state.error {
        let _ = writeln!(out, "Last catalog error: {}", error);
    }

    out
}

/// Market listing, one player per line. Rostered players are tagged.
pub fn render_market(state: &RosterState, players: &[&Player], limit: usize) -> String {
    let mut out = String::new();

    for player in players.iter().take(limit) {
        let tag = if state.is_rostered(player.id) { " [rostered]" } else { "" };
        let _ = writeln!(out, "{:>6}  {}{}", player.id, player_line(player), tag);
    }

    if players.len() > limit {
        let _ = writeln!(out, "... {} more", players.len() - limit);
    }
    if players.is_empty() {
        let _ = writeln!(out, "No players match");
    }

    out
}

pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Accepted => "Done".to_string(),
        Outcome::Ignored => "Nothing changed".to_string(),
        Outcome::Rejected(notice) => notice.to_string(),
        Outcome::Malformed(err) => format!("Invalid roster data: {}", err),
    }
}
