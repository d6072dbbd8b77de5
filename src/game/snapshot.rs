//! Point-in-time copy of the game zones.

use crate::cards::{Card, CardSet, HoleCards};

use super::opponent::OpponentHand;

/// Community cards at showdown.
pub const BOARD_SIZE: usize = 5;

/// Immutable view of every zone, taken in one step from a `GameState`.
///
/// Estimations read only from a snapshot, so they never observe a state torn
/// between two dealing operations.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub player: HoleCards,
    pub opponents: Vec<OpponentHand>,
    pub board: Vec<Card>,
    pub burned: Vec<Card>,
    pub deck: CardSet,
}

impl GameSnapshot {
    /// Board cards still to come. Burned cards count against the five.
    pub fn missing_board_cards(&self) -> usize {
        BOARD_SIZE.saturating_sub(self.board.len() + self.burned.len())
    }

    /// Board and burned cards together, the set every hand is scored with.
    pub fn community(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.board.len() + self.burned.len());
        cards.extend_from_slice(&self.board);
        cards.extend_from_slice(&self.burned);
        cards
    }

    /// Every card outside the deck.
    pub fn dead_cards(&self) -> CardSet {
        let mut dead: CardSet = self.player.cards().iter().collect();
        for opponent in &self.opponents {
            for &card in &opponent.cards {
                dead.insert(card);
            }
        }
        for &card in self.board.iter().chain(&self.burned) {
            dead.insert(card);
        }
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn snapshot(board: &str, burned: &str) -> GameSnapshot {
        let board = parse_cards(board).unwrap();
        let burned = parse_cards(burned).unwrap();
        let player: HoleCards = "As 7d".parse().unwrap();
        let mut deck = CardSet::full();
        for card in player.cards().iter().chain(&board).chain(&burned) {
            deck.remove(*card);
        }
        GameSnapshot {
            player,
            opponents: vec![OpponentHand::new("player2")],
            board,
            burned,
            deck,
        }
    }

    #[test]
    fn test_missing_board_cards() {
        assert_eq!(snapshot("", "").missing_board_cards(), 5);
        assert_eq!(snapshot("Kh Qh Jh", "").missing_board_cards(), 2);
        assert_eq!(snapshot("Kh Qh Jh", "2c 3c").missing_board_cards(), 0);
        assert_eq!(snapshot("Kh Qh Jh Th 9h", "2c").missing_board_cards(), 0);
    }

    #[test]
    fn test_community_and_dead_cards() {
        let snap = snapshot("Kh Qh Jh", "2c");
        assert_eq!(snap.community().len(), 4);
        let dead = snap.dead_cards();
        assert_eq!(dead.len(), 6);
        assert!(dead.is_disjoint(&snap.deck));
        assert_eq!(dead.union(&snap.deck).len(), 52);
    }
}
