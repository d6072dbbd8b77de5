//! Game state manager.
//!
//! `GameState` owns the card zones of one game: the player's hole cards,
//! every opponent's known cards, the board, the burned pile and the deck.
//! Every card of the 52-card universe sits in exactly one zone; each
//! mutating operation preserves that, including under malformed input.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use super::opponent::{opponent_name, OpponentHand, HAND_SIZE};
use super::snapshot::{GameSnapshot, BOARD_SIZE};
use crate::cards::{Card, CardSet, HoleCards, NUM_CARDS};
use crate::error::{OddsError, Result};

/// Smallest supported table, the player plus one opponent.
pub const MIN_PLAYERS: usize = 2;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 15;

/// Outcome of a batch operation that applies cards one at a time.
///
/// Rejected cards leave the state untouched; the remaining cards in the same
/// call are still processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealReport {
    /// Cards that were moved, in order.
    pub applied: Vec<Card>,
    /// One error per rejected card.
    pub rejected: Vec<OddsError>,
}

impl DealReport {
    /// True if every card was applied.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Collapse into a `Result`, failing with the first rejection.
    pub fn into_result(self) -> Result<Vec<Card>> {
        match self.rejected.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.applied),
        }
    }
}

/// Zones of one game and the random source used to deal into them.
#[derive(Debug, Clone)]
pub struct GameState {
    num_players: usize,
    player: HoleCards,
    opponents: Vec<OpponentHand>,
    /// Opponent name -> index into `opponents`.
    seats: FxHashMap<String, usize>,
    board: Vec<Card>,
    burned: Vec<Card>,
    deck: CardSet,
    rng: StdRng,
}

impl GameState {
    /// Start a game with `num_players` seats (the player included).
    ///
    /// # Arguments
    /// * `num_players` - Players at the table, 2 to 15
    /// * `hole_cards` - The tracked player's cards
    /// * `seed` - Seed for dealing; `None` draws one from the OS
    pub fn new(num_players: usize, hole_cards: HoleCards, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = Self {
            num_players: 0,
            player: hole_cards,
            opponents: Vec::new(),
            seats: FxHashMap::default(),
            board: Vec::with_capacity(BOARD_SIZE),
            burned: Vec::new(),
            deck: CardSet::full(),
            rng,
        };
        state.new_game(num_players, hole_cards)?;
        Ok(state)
    }

    /// Reset every zone for a fresh game. The random source carries over.
    pub fn new_game(&mut self, num_players: usize, hole_cards: HoleCards) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(OddsError::InvalidPlayerCount(num_players));
        }

        let mut deck = CardSet::full();
        for card in hole_cards.cards() {
            deck.remove(card);
        }

        self.num_players = num_players;
        self.player = hole_cards;
        self.opponents = (2..=num_players)
            .map(|seat| OpponentHand::new(opponent_name(seat)))
            .collect();
        self.seats = self
            .opponents
            .iter()
            .enumerate()
            .map(|(i, opp)| (opp.name.clone(), i))
            .collect();
        self.board.clear();
        self.burned.clear();
        self.deck = deck;

        debug!("new game: {} players, hole cards {}", num_players, hole_cards);
        self.debug_check();
        Ok(())
    }

    /// Deal the player two fresh random hole cards.
    ///
    /// The current hole cards go back into the deck first, so they may be
    /// dealt again.
    pub fn deal_hole_cards(&mut self) -> Result<HoleCards> {
        let mut pool = self.deck;
        for card in self.player.cards() {
            pool.insert(card);
        }
        let remaining = pool.len();
        let drawn = pool
            .draw(HAND_SIZE, &mut self.rng)
            .ok_or(OddsError::EmptyDeck {
                needed: HAND_SIZE,
                remaining,
            })?;

        self.player = HoleCards::new(drawn[0], drawn[1])?;
        self.deck = pool;
        debug!("dealt hole cards {}", self.player);
        self.debug_check();
        Ok(self.player)
    }

    /// Deal the missing cards of every opponent whose hand is not complete.
    ///
    /// Nothing is dealt unless the deck can cover every opponent.
    pub fn deal_opponent_hands(&mut self) -> Result<Vec<OpponentHand>> {
        let needed: usize = self.opponents.iter().map(OpponentHand::missing).sum();
        if needed > self.deck.len() {
            return Err(OddsError::EmptyDeck {
                needed,
                remaining: self.deck.len(),
            });
        }

        for opponent in &mut self.opponents {
            let missing = opponent.missing();
            if missing == 0 {
                continue;
            }
            let drawn = self
                .deck
                .draw(missing, &mut self.rng)
                .ok_or(OddsError::EmptyDeck {
                    needed: missing,
                    remaining: self.deck.len(),
                })?;
            opponent.cards.extend(drawn);
        }

        debug!("dealt {} opponent cards, {} left in deck", needed, self.deck.len());
        self.debug_check();
        Ok(self.opponents.clone())
    }

    /// Append cards to the board, one at a time.
    ///
    /// A card that is not in the deck, or that would overflow the board, is
    /// rejected and skipped; the rest of the call still applies.
    pub fn update_board(&mut self, cards: &[Card]) -> DealReport {
        let mut report = DealReport::default();
        for &card in cards {
            match self.add_board_card(card) {
                Ok(()) => report.applied.push(card),
                Err(err) => {
                    warn!("board update rejected: {}", err);
                    report.rejected.push(err);
                }
            }
        }
        self.debug_check();
        report
    }

    /// Like `update_board`, for raw text tokens. A malformed token is
    /// rejected as `CardNotInDeck` carrying the token.
    pub fn update_board_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) -> DealReport {
        let mut report = DealReport::default();
        for token in tokens {
            let token = token.as_ref();
            let result = token
                .parse::<Card>()
                .map_err(|_| OddsError::CardNotInDeck(token.to_string()))
                .and_then(|card| self.add_board_card(card).map(|()| card));
            match result {
                Ok(card) => report.applied.push(card),
                Err(err) => {
                    warn!("board update rejected: {}", err);
                    report.rejected.push(err);
                }
            }
        }
        self.debug_check();
        report
    }

    fn add_board_card(&mut self, card: Card) -> Result<()> {
        if !self.deck.contains(card) {
            return Err(OddsError::CardNotInDeck(card.to_string()));
        }
        if self.board.len() >= BOARD_SIZE {
            return Err(OddsError::BoardFull(card));
        }
        self.deck.remove(card);
        self.board.push(card);
        Ok(())
    }

    /// Move a card from the deck to the burned pile.
    pub fn reveal_card(&mut self, card: Card) -> Result<()> {
        if !self.deck.remove(card) {
            warn!("reveal rejected: {} is not in the deck", card);
            return Err(OddsError::CardNotInDeck(card.to_string()));
        }
        self.burned.push(card);
        debug!("burned {}", card);
        self.debug_check();
        Ok(())
    }

    /// Give a known card to a named opponent.
    pub fn add_to_opponent_hand(&mut self, name: &str, card: Card) -> Result<()> {
        let &seat = self
            .seats
            .get(name)
            .ok_or_else(|| OddsError::UnknownOpponent(name.to_string()))?;
        let opponent = &mut self.opponents[seat];

        if opponent.is_complete() {
            return Err(OddsError::HandFull(name.to_string()));
        }
        if !self.deck.remove(card) {
            warn!("cannot give {} to {}: not in the deck", card, name);
            return Err(OddsError::CardNotInDeck(card.to_string()));
        }
        opponent.cards.push(card);
        debug!("{} now holds {:?}", name, opponent.cards);
        self.debug_check();
        Ok(())
    }

    /// Copy every zone at this point in time.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            player: self.player,
            opponents: self.opponents.clone(),
            board: self.board.clone(),
            burned: self.burned.clone(),
            deck: self.deck,
        }
    }

    /// Verify that the zones partition the 52-card universe.
    pub fn check_invariant(&self) -> Result<()> {
        if self.board.len() > BOARD_SIZE {
            return Err(OddsError::InvariantViolation(format!(
                "board holds {} cards",
                self.board.len()
            )));
        }

        let mut held = CardSet::EMPTY;
        let zones = self
            .player
            .cards()
            .into_iter()
            .chain(self.opponents.iter().flat_map(|opp| opp.cards.iter().copied()))
            .chain(self.board.iter().copied())
            .chain(self.burned.iter().copied());
        for card in zones {
            if !held.insert(card) {
                return Err(OddsError::InvariantViolation(format!(
                    "{} is held by more than one zone",
                    card
                )));
            }
        }

        if let Some(card) = held.intersection(&self.deck).iter().next() {
            return Err(OddsError::InvariantViolation(format!(
                "{} is both held and in the deck",
                card
            )));
        }
        if let Some(opp) = self.opponents.iter().find(|opp| opp.cards.len() > HAND_SIZE) {
            return Err(OddsError::InvariantViolation(format!(
                "{} holds {} cards",
                opp.name,
                opp.cards.len()
            )));
        }

        let total = held.union(&self.deck).len();
        if total != NUM_CARDS {
            return Err(OddsError::InvariantViolation(format!(
                "zones cover {} of {} cards",
                total, NUM_CARDS
            )));
        }
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.check_invariant().is_ok(),
            "{:?}",
            self.check_invariant()
        );
    }

    /// Players at the table, the tracked player included.
    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// The tracked player's hole cards.
    pub fn player_hand(&self) -> HoleCards {
        self.player
    }

    /// Opponents in seat order, `player2` first.
    pub fn opponents(&self) -> &[OpponentHand] {
        &self.opponents
    }

    /// Look up an opponent by name.
    pub fn opponent(&self, name: &str) -> Option<&OpponentHand> {
        self.seats.get(name).map(|&seat| &self.opponents[seat])
    }

    /// Community cards in the order they were dealt.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Revealed cards that are not on the board.
    pub fn burned(&self) -> &[Card] {
        &self.burned
    }

    /// Cards not yet seen anywhere.
    pub fn deck(&self) -> &CardSet {
        &self.deck
    }
}
