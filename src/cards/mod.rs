//! Card and deck model.
//!
//! ## Modules
//!
//! - `card`: `Card` and `HoleCards`, plus text token parsing
//! - `set`: `CardSet`, the identity-keyed container used for every zone

pub mod card;
pub mod set;

pub use card::{parse_cards, Card, HoleCards, NUM_CARDS};
pub use set::CardSet;
