//! Game state bookkeeping.
//!
//! ## Modules
//!
//! - `state`: `GameState`, the zone manager and its dealing operations
//! - `opponent`: `OpponentHand`, known cards of one opponent
//! - `snapshot`: `GameSnapshot`, the immutable copy estimations read from

pub mod opponent;
pub mod snapshot;
pub mod state;

pub use opponent::{opponent_name, OpponentHand, HAND_SIZE};
pub use snapshot::{GameSnapshot, BOARD_SIZE};
pub use state::{DealReport, GameState, MAX_PLAYERS, MIN_PLAYERS};
