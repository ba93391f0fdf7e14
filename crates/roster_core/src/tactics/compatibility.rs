use crate::models::Position;

/// Whether a player at `a` may take over a lineup spot held by a player at
/// `b` (and vice versa). Symmetric and total.
///
/// Goalkeepers, fullbacks, defenders and forwards only swap like-for-like.
/// Defensive midfielders and midfielders are interchangeable.
pub fn compatible(a: Position, b: Position) -> bool {
    match (a, b) {
        (a, b) if a.is_midfield() && b.is_midfield() => true,
        (a, b) => a == b,
    }
}
