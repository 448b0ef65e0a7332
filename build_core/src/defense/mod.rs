//! Defense system - Defense and elemental resistance totals
//!
//! Totals are plain sums over equipped pieces: defense uses `defense_base`
//! only, and resistances keep their sign.

mod armor;
mod resistance;

pub use armor::total_defense;
pub use resistance::{total_resistances, Element, Resistances};
