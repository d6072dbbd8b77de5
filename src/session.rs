//! One tracked game together with the simulator that estimates it.
//!
//! `Session` is the entry point most callers want: it owns a [`GameState`],
//! forwards the dealing operations to it, and runs estimations against a
//! fresh snapshot each time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{Card, HoleCards};
use crate::error::Result;
use crate::eval::{Evaluator, HandCategory, Score, StandardEvaluator};
use crate::game::{DealReport, GameState, OpponentHand};
use crate::sim::{beating_hands, Estimate, SimConfig, Simulator};

/// The player's current made hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    pub hole_cards: HoleCards,
    pub board: Vec<Card>,
    pub score: Score,
    pub category: HandCategory,
}

impl fmt::Display for HandSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on [{}]: {} (score {})",
            self.hole_cards,
            self.board
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            self.category,
            self.score
        )
    }
}

/// A game in progress plus its estimator.
pub struct Session<E: Evaluator = StandardEvaluator> {
    state: GameState,
    simulator: Simulator<E>,
}

impl Session<StandardEvaluator> {
    /// Start a session with the bundled evaluator.
    ///
    /// `config.seed` seeds both dealing and simulation.
    pub fn new(num_players: usize, hole_cards: HoleCards, config: SimConfig) -> Result<Self> {
        Self::with_evaluator(num_players, hole_cards, config, StandardEvaluator::new())
    }
}

impl<E: Evaluator> Session<E> {
    pub fn with_evaluator(
        num_players: usize,
        hole_cards: HoleCards,
        config: SimConfig,
        evaluator: E,
    ) -> Result<Self> {
        let state = GameState::new(num_players, hole_cards, config.seed)?;
        let simulator = Simulator::new(evaluator, config)?;
        Ok(Self { state, simulator })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn simulator(&self) -> &Simulator<E> {
        &self.simulator
    }

    pub fn simulator_mut(&mut self) -> &mut Simulator<E> {
        &mut self.simulator
    }

    pub fn new_game(&mut self, num_players: usize, hole_cards: HoleCards) -> Result<()> {
        self.state.new_game(num_players, hole_cards)
    }

    pub fn deal_hole_cards(&mut self) -> Result<HoleCards> {
        self.state.deal_hole_cards()
    }

    pub fn deal_opponent_hands(&mut self) -> Result<Vec<OpponentHand>> {
        self.state.deal_opponent_hands()
    }

    pub fn update_board(&mut self, cards: &[Card]) -> DealReport {
        self.state.update_board(cards)
    }

    pub fn update_board_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> DealReport {
        self.state.update_board_tokens(tokens)
    }

    pub fn reveal_card(&mut self, card: Card) -> Result<()> {
        self.state.reveal_card(card)
    }

    pub fn add_to_opponent_hand(&mut self, name: &str, card: Card) -> Result<()> {
        self.state.add_to_opponent_hand(name, card)
    }

    /// Win probability against the table's opponents.
    ///
    /// Opponents without two cards are dealt their missing cards first. Those
    /// deals persist, so later calls in the same game face the same hands.
    pub fn calculate_win_probabilities(&mut self) -> Result<Estimate> {
        let opponents = self.state.deal_opponent_hands()?;
        self.simulator
            .simulate_remaining_game(&self.state.snapshot(), &opponents)
    }

    /// Win probability with every unknown opponent card drawn afresh per
    /// trial. Nothing is dealt.
    pub fn calculate_equity(&self) -> Result<Estimate> {
        self.simulator.equity(&self.state.snapshot())
    }

    /// Probability that some opponent finishes with `hand_type` or better.
    pub fn calculate_hand_probability(&self, hand_type: &str) -> Result<Estimate> {
        self.simulator
            .hand_probability(&self.state.snapshot(), hand_type)
    }

    /// Holdings that beat the player on the current board.
    pub fn get_beating_hands(&self) -> Vec<HoleCards> {
        beating_hands(self.simulator.evaluator(), &self.state.snapshot())
    }

    pub fn show_hand(&self) -> HandSummary {
        let evaluator = self.simulator.evaluator();
        let hole_cards = self.state.player_hand();
        let board = self.state.board().to_vec();
        let score = evaluator.evaluate(&hole_cards.cards(), &board);
        HandSummary {
            hole_cards,
            board,
            score,
            category: evaluator.classify(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::error::OddsError;

    fn session(num_players: usize, hole: &str) -> Session {
        let config = SimConfig::default().with_trials(2_000).with_seed(99);
        Session::new(num_players, hole.parse().unwrap(), config).unwrap()
    }

    #[test]
    fn test_win_probability_deals_opponents_once() {
        let mut session = session(4, "As 7d");
        let first = session.calculate_win_probabilities().unwrap();
        assert!((0.0..=1.0).contains(&first.probability()));

        let dealt: Vec<OpponentHand> = session.state().opponents().to_vec();
        assert!(dealt.iter().all(OpponentHand::is_complete));
        assert_eq!(session.state().deck().len(), 52 - 2 - 6);

        session.calculate_win_probabilities().unwrap();
        assert_eq!(session.state().opponents(), dealt.as_slice());
    }

    #[test]
    fn test_every_stage() {
        let mut session = session(3, "Ah Kh");
        for board in ["Qh Jh 2c", "3d", "9s"] {
            assert!(session.update_board(&parse_cards(board).unwrap()).is_clean());
            let estimate = session.calculate_win_probabilities().unwrap();
            assert!((0.0..=1.0).contains(&estimate.probability()));
        }
        assert_eq!(session.state().board().len(), 5);
    }

    #[test]
    fn test_equity_leaves_state_alone() {
        let session = session(5, "As 7d");
        let estimate = session.calculate_equity().unwrap();
        assert!((0.0..=1.0).contains(&estimate.probability()));
        assert!(session.state().opponents().iter().all(|opp| opp.cards.is_empty()));
        assert_eq!(session.state().deck().len(), 50);
    }

    #[test]
    fn test_repeatable_with_same_seed() {
        let a = session(3, "As 7d").calculate_equity().unwrap();
        let b = session(3, "As 7d").calculate_equity().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_hand_probability() {
        let mut session = session(2, "As 7d");
        session.update_board_tokens(&["Kh", "Qh", "Jh"]).into_result().unwrap();
        let estimate = session.calculate_hand_probability("Straight Flush").unwrap();
        assert!((0.0..=1.0).contains(&estimate.probability()));
        assert_eq!(
            session.calculate_hand_probability("fluhs"),
            Err(OddsError::InvalidHandType("fluhs".to_string()))
        );
    }

    #[test]
    fn test_board_rejections() {
        let mut session = session(2, "As 7d");
        let report = session.update_board_tokens(&["Kh", "As", "zz"]);
        assert_eq!(report.applied.len(), 1);
        assert_eq!(
            report.rejected,
            vec![
                OddsError::CardNotInDeck("As".to_string()),
                OddsError::CardNotInDeck("zz".to_string())
            ]
        );
        assert_eq!(session.state().board().len(), 1);
    }

    #[test]
    fn test_show_hand() {
        let mut session = session(2, "As Ad");
        assert_eq!(session.show_hand().category, HandCategory::OnePair);

        session.update_board(&parse_cards("Ac Kd Ks").unwrap());
        let summary = session.show_hand();
        assert_eq!(summary.category, HandCategory::FullHouse);
        assert_eq!(summary.board.len(), 3);
        assert!(summary.to_string().contains("Full House"));
    }

    #[test]
    fn test_beating_hands() {
        let mut session = session(2, "As Ad");
        session.update_board(&parse_cards("Ac Kd Ks").unwrap());
        // Only quad kings beat aces full of kings.
        let hands = session.get_beating_hands();
        assert_eq!(hands, vec!["Kh Kc".parse::<HoleCards>().unwrap()]);
    }

    #[test]
    fn test_opponent_cards() {
        let mut session = session(3, "As 7d");
        session.add_to_opponent_hand("player2", "Kd".parse().unwrap()).unwrap();
        assert_eq!(
            session.add_to_opponent_hand("player9", "Qd".parse().unwrap()),
            Err(OddsError::UnknownOpponent("player9".to_string()))
        );
        session.reveal_card("2c".parse().unwrap()).unwrap();
        assert_eq!(session.state().deck().len(), 48);

        session.new_game(2, "Kh Kc".parse().unwrap()).unwrap();
        assert_eq!(session.state().deck().len(), 50);
        assert!(session.state().burned().is_empty());
    }

    #[test]
    fn test_invalid_setup() {
        assert!(matches!(
            Session::new(1, "As 7d".parse().unwrap(), SimConfig::default()),
            Err(OddsError::InvalidPlayerCount(1))
        ));
        assert!(matches!(
            Session::new(2, "As 7d".parse().unwrap(), SimConfig::default().with_trials(0)),
            Err(OddsError::Config(_))
        ));
    }
}
