//! Enumeration of the two-card holdings that currently beat the player.

use itertools::Itertools;
use log::debug;

use crate::cards::HoleCards;
use crate::eval::Evaluator;
use crate::game::GameSnapshot;

/// Every pair of deck cards that, combined with the current board, scores
/// strictly better than the player's hole cards on that board.
///
/// No board cards are added: before the flop both sides are ranked on their
/// two cards alone. Combinations are visited in ascending card order, so the
/// result is deterministic.
pub fn beating_hands<E: Evaluator + ?Sized>(
    evaluator: &E,
    snapshot: &GameSnapshot,
) -> Vec<HoleCards> {
    let player = evaluator.evaluate(&snapshot.player.cards(), &snapshot.board);
    let deck = snapshot.deck.to_vec();

    let beating: Vec<HoleCards> = deck
        .iter()
        .tuple_combinations()
        .filter(|&(&a, &b)| evaluator.evaluate(&[a, b], &snapshot.board).beats(player))
        .filter_map(|(&a, &b)| HoleCards::new(a, b).ok())
        .collect();

    debug!(
        "{} of {} holdings beat {}",
        beating.len(),
        combinations(deck.len()),
        snapshot.player
    );
    beating
}

/// Number of two-card holdings in a deck of `deck_size` cards.
pub fn combinations(deck_size: usize) -> usize {
    deck_size * deck_size.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card, CardSet};
    use crate::eval::StandardEvaluator;
    use crate::game::{GameState, OpponentHand};

    fn snapshot(hole: &str, board: &str) -> GameSnapshot {
        let mut state = GameState::new(2, hole.parse().unwrap(), Some(1)).unwrap();
        assert!(state.update_board(&parse_cards(board).unwrap()).is_clean());
        state.snapshot()
    }

    #[test]
    fn test_combinations() {
        assert_eq!(combinations(0), 0);
        assert_eq!(combinations(1), 0);
        assert_eq!(combinations(2), 1);
        assert_eq!(combinations(50), 1225);
    }

    #[test]
    fn test_nothing_beats_the_nuts() {
        let snap = snapshot("Ah Kh", "Qh Jh Th");
        assert!(beating_hands(&StandardEvaluator::new(), &snap).is_empty());
    }

    #[test]
    fn test_preflop_only_bigger_pairs_beat_a_pair() {
        let snap = snapshot("Qs Qd", "");
        let hands = beating_hands(&StandardEvaluator::new(), &snap);
        // Kings: 6 combos, aces: 6 combos.
        assert_eq!(hands.len(), 12);
        assert!(hands.iter().all(|hand| hand.is_pair()));
    }

    #[test]
    fn test_every_out_beats_the_player() {
        let evaluator = StandardEvaluator::new();
        let snap = snapshot("As 7d", "Kh 9c 2d");
        let player = evaluator.evaluate(&snap.player.cards(), &snap.board);

        let hands = beating_hands(&evaluator, &snap);
        assert!(!hands.is_empty());
        for hand in &hands {
            assert!(evaluator.evaluate(&hand.cards(), &snap.board).beats(player));
            assert!(hand.cards().iter().all(|card| snap.deck.contains(*card)));
        }
        // Equal holdings never count.
        let tie: HoleCards = "Ac 7h".parse().unwrap();
        assert!(!hands.contains(&tie));
    }

    #[test]
    fn test_two_card_deck() {
        let evaluator = StandardEvaluator::new();
        let deck: CardSet = parse_cards("Ac Ad").unwrap().iter().collect();
        let snap = GameSnapshot {
            player: "7s 2d".parse().unwrap(),
            opponents: vec![OpponentHand::new("player2")],
            board: Vec::new(),
            burned: Vec::new(),
            deck,
        };
        let hands = beating_hands(&evaluator, &snap);
        assert_eq!(hands.len(), 1);
        assert!(hands[0].contains("Ac".parse::<Card>().unwrap()));

        let empty = GameSnapshot {
            deck: CardSet::EMPTY,
            ..snap
        };
        assert!(beating_hands(&evaluator, &empty).is_empty());
    }
}
