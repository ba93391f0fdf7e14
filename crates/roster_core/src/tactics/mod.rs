// crates/roster_core/src/tactics/mod.rs
// Formation rules: slot maps, position compatibility and slot assignment

pub mod compatibility;
pub mod formation;
pub mod vacancy;

pub use compatibility::compatible;
pub use formation::{slot_map, Formation, FormationRow, Line, SlotMap, LINEUP_SIZE};
pub use vacancy::{first_compatible_vacancy, occupants_for};
