//! Opponent hands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;

/// Cards in a complete hold'em hand.
pub const HAND_SIZE: usize = 2;

/// Seat name for an opponent. The tracked player is `player1`, opponents are
/// `player2` upwards.
pub fn opponent_name(seat: usize) -> String {
    format!("player{}", seat)
}

/// Known hole cards of one opponent. Unknown cards are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentHand {
    pub name: String,
    pub cards: Vec<Card>,
}

impl OpponentHand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::with_capacity(HAND_SIZE),
        }
    }

    pub fn with_cards(name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    /// Number of cards still unknown.
    pub fn missing(&self) -> usize {
        HAND_SIZE.saturating_sub(self.cards.len())
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == HAND_SIZE
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

impl fmt::Display for OpponentHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        for _ in 0..self.missing() {
            write!(f, "??")?;
        }
        Ok(())
    }
}
