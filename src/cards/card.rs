//! Card representation.
//!
//! - `Card`: a single playing card, identified by an id in `0..52`
//! - `HoleCards`: a player's two private cards

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OddsError;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Number of cards in the universe.
pub const NUM_CARDS: usize = 52;

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!((id as usize) < NUM_CARDS, "card id must be 0-51");
        Self { id }
    }

    /// All 52 cards in id order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..NUM_CARDS as u8).map(Card::from_id)
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Suit (0-3: c, d, h, s).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl FromStr for Card {
    type Err = OddsError;

    /// Parse a card from tokens like "As", "kh", "Td" or "10d".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OddsError::InvalidCard(s.to_string());
        let token = s.trim();
        let (rank_part, suit_part) = match token.char_indices().last() {
            Some((idx, _)) if idx > 0 => token.split_at(idx),
            _ => return Err(invalid()),
        };

        let rank = match rank_part {
            "10" => RANK_T as usize,
            r if r.chars().count() == 1 => {
                let c = r.chars().next().ok_or_else(invalid)?.to_ascii_uppercase();
                RANK_CHARS.iter().position(|&rc| rc == c).ok_or_else(invalid)?
            }
            _ => return Err(invalid()),
        };
        let suit_char = suit_part.chars().next().ok_or_else(invalid)?.to_ascii_lowercase();
        let suit = SUIT_CHARS.iter().position(|&sc| sc == suit_char).ok_or_else(invalid)?;

        Ok(Self::new(rank as u8, suit as u8))
    }
}

impl TryFrom<String> for Card {
    type Error = OddsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a whitespace separated list of card tokens, e.g. "As 7d".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, OddsError> {
    s.split_whitespace().map(str::parse).collect()
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    ///
    /// Fails with `DuplicateCard` if both cards are the same card.
    pub fn new(card1: Card, card2: Card) -> Result<Self, OddsError> {
        if card1 == card2 {
            return Err(OddsError::DuplicateCard(card1));
        }
        if card1.id() >= card2.id() {
            Ok(Self { card1, card2 })
        } else {
            Ok(Self {
                card1: card2,
                card2: card1,
            })
        }
    }

    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = OddsError;

    /// Parse hole cards from "As 7d", "As7d" or "10h 9h".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [a, b] => Self::new(a.parse()?, b.parse()?),
            [compact] if compact.is_ascii() && compact.len() >= 4 => {
                // Compact form without a separator; a leading "10" is three bytes.
                let split = if compact.starts_with("10") { 3 } else { 2 };
                let (a, b) = compact.split_at(split);
                Self::new(a.parse()?, b.parse()?)
            }
            _ => Err(OddsError::InvalidCard(s.to_string())),
        }
    }
}

impl TryFrom<String> for HoleCards {
    type Error = OddsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HoleCards> for String {
    fn from(hand: HoleCards) -> Self {
        hand.to_string()
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
