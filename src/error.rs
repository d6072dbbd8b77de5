//! Error types shared across the crate.

use thiserror::Error;

use crate::cards::Card;
use crate::sim::config::ConfigError;

/// Crate-wide result alias.
pub type Result<T, E = OddsError> = std::result::Result<T, E>;

/// Errors reported by game state operations and estimations.
///
/// All variants are recoverable: callers are expected to surface them and
/// keep the game going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OddsError {
    /// The card (or malformed token) is not currently in the deck.
    #[error("card {0} is not in the deck")]
    CardNotInDeck(String),

    /// A text token could not be parsed as a card.
    #[error("invalid card '{0}'")]
    InvalidCard(String),

    /// No opponent with this name is seated.
    #[error("opponent {0} does not exist")]
    UnknownOpponent(String),

    /// The deck cannot satisfy a draw request.
    #[error("not enough cards in the deck: need {needed}, {remaining} remaining")]
    EmptyDeck { needed: usize, remaining: usize },

    /// A hand passed to the simulator does not hold exactly two cards.
    #[error("hand of {owner} has {cards} card(s), expected 2")]
    IncompleteHand { owner: String, cards: usize },

    /// The hand category name is not in the evaluator's registry.
    #[error("invalid hand type '{0}'")]
    InvalidHandType(String),

    /// The opponent already holds two cards.
    #[error("{0} already holds two cards")]
    HandFull(String),

    /// The board already holds five cards.
    #[error("board is full, cannot add {0}")]
    BoardFull(Card),

    /// Player count outside the supported range.
    #[error("player count {0} is out of range 2..=15")]
    InvalidPlayerCount(usize),

    /// The same card was supplied for two places at once.
    #[error("card {0} is used more than once")]
    DuplicateCard(Card),

    /// The zone partition no longer covers the deck exactly once.
    #[error("zone invariant violated: {0}")]
    InvariantViolation(String),

    /// The estimation was cancelled or timed out before any trial finished.
    #[error("estimation cancelled before any trial completed")]
    Cancelled,

    /// The worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// Invalid simulation configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<rayon::ThreadPoolBuildError> for OddsError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        OddsError::ThreadPool(e.to_string())
    }
}
