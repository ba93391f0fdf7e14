pub mod player;

pub use player::{Club, Player, Position};
