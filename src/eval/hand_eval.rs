//! Poker hand evaluation.
//!
//! `StandardEvaluator` ranks any number of cards directly from rank counts
//! and per-suit rank masks, picking the best five. With fewer than five
//! cards it ranks the partial hand (pairs, trips, quads and kickers), which
//! is what outs enumeration needs before the flop.

use rustc_hash::FxHashMap;

use super::category::{normalize_name, HandCategory};
use super::evaluator::{Evaluator, Score};
use crate::cards::card::{RANK_5, RANK_A};
use crate::cards::Card;

/// Every encoded rank is strictly below this value.
const SCORE_CEILING: u32 = 9 << 20;

/// A hand rank where higher values are better hands.
/// Format: category (4 bits) | kicker1 (4 bits) | kicker2 (4 bits) | ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(u32);

impl HandRank {
    fn new(category: HandCategory, kickers: &[u8]) -> Self {
        let mut value = (category as u32) << 20;
        for (i, &k) in kickers.iter().take(5).enumerate() {
            value |= (k as u32) << (16 - i * 4);
        }
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn category(&self) -> HandCategory {
        HandCategory::from_index(self.0 >> 20)
    }

    /// Convert to the evaluator's score scale (lower is stronger).
    pub fn to_score(self) -> Score {
        Score(SCORE_CEILING - self.0)
    }

    fn from_score(score: Score) -> Self {
        Self(SCORE_CEILING.saturating_sub(score.0))
    }
}

/// Hand evaluator bundled with the crate.
#[derive(Debug, Clone)]
pub struct StandardEvaluator {
    thresholds: FxHashMap<&'static str, Score>,
}

impl Default for StandardEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardEvaluator {
    pub fn new() -> Self {
        let mut thresholds = FxHashMap::default();
        for category in HandCategory::ALL {
            thresholds.insert(category.key(), HandRank::new(category, &[]).to_score());
        }
        thresholds.insert(
            "one_pair",
            HandRank::new(HandCategory::OnePair, &[]).to_score(),
        );
        thresholds.insert(
            "royal_flush",
            HandRank::new(HandCategory::StraightFlush, &[RANK_A]).to_score(),
        );
        Self { thresholds }
    }

    /// Rank the best hand that can be made from `cards`.
    pub fn rank<'a, I>(&self, cards: I) -> HandRank
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut rank_counts = [0u8; 13];
        let mut suit_bits = [0u16; 4];
        let mut rank_bits = 0u16;

        for card in cards {
            rank_counts[card.rank() as usize] += 1;
            suit_bits[card.suit() as usize] |= 1 << card.rank();
            rank_bits |= 1 << card.rank();
        }

        // Straight flush
        let straight_flush = suit_bits
            .iter()
            .filter(|bits| bits.count_ones() >= 5)
            .filter_map(|&bits| find_straight(bits))
            .max();
        if let Some(high) = straight_flush {
            return HandRank::new(HandCategory::StraightFlush, &[high]);
        }

        let mut quads = Vec::new();
        let mut trips = Vec::new();
        let mut pairs = Vec::new();

        for rank in (0..13u8).rev() {
            match rank_counts[rank as usize] {
                4 => quads.push(rank),
                3 => trips.push(rank),
                2 => pairs.push(rank),
                _ => {}
            }
        }

        if let Some(&quad) = quads.first() {
            let kickers = top_ranks(&rank_counts, &[quad], 1);
            return HandRank::new(HandCategory::FourOfAKind, &[quad, kick(&kickers, 0)]);
        }

        if let Some(&trip) = trips.first() {
            let pair_rank = trips.get(1).copied().max(pairs.first().copied());
            if let Some(pair_rank) = pair_rank {
                return HandRank::new(HandCategory::FullHouse, &[trip, pair_rank]);
            }
        }

        if let Some(&bits) = suit_bits.iter().filter(|bits| bits.count_ones() >= 5).max() {
            let flush_ranks: Vec<u8> = (0..13u8)
                .rev()
                .filter(|r| bits & (1 << r) != 0)
                .take(5)
                .collect();
            return HandRank::new(HandCategory::Flush, &flush_ranks);
        }

        if let Some(high) = find_straight(rank_bits) {
            return HandRank::new(HandCategory::Straight, &[high]);
        }

        if let Some(&trip) = trips.first() {
            let kickers = top_ranks(&rank_counts, &[trip], 2);
            return HandRank::new(
                HandCategory::ThreeOfAKind,
                &[trip, kick(&kickers, 0), kick(&kickers, 1)],
            );
        }

        if pairs.len() >= 2 {
            let kickers = top_ranks(&rank_counts, &pairs[..2], 1);
            return HandRank::new(
                HandCategory::TwoPair,
                &[pairs[0], pairs[1], kick(&kickers, 0)],
            );
        }

        if let Some(&pair) = pairs.first() {
            let kickers = top_ranks(&rank_counts, &[pair], 3);
            return HandRank::new(
                HandCategory::OnePair,
                &[pair, kick(&kickers, 0), kick(&kickers, 1), kick(&kickers, 2)],
            );
        }

        HandRank::new(HandCategory::HighCard, &top_ranks(&rank_counts, &[], 5))
    }
}

impl Evaluator for StandardEvaluator {
    fn evaluate(&self, hand: &[Card], board: &[Card]) -> Score {
        self.rank(hand.iter().chain(board)).to_score()
    }

    fn classify(&self, score: Score) -> HandCategory {
        HandRank::from_score(score).category()
    }

    fn threshold(&self, name: &str) -> Option<Score> {
        self.thresholds.get(normalize_name(name).as_str()).copied()
    }

    fn category_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.thresholds.keys().copied().collect();
        names.sort_by_key(|name| self.thresholds[name]);
        names
    }
}

/// Highest `n` distinct ranks present, skipping `exclude`.
fn top_ranks(rank_counts: &[u8; 13], exclude: &[u8], n: usize) -> Vec<u8> {
    (0..13u8)
        .rev()
        .filter(|r| rank_counts[*r as usize] > 0 && !exclude.contains(r))
        .take(n)
        .collect()
}

#[inline]
fn kick(kickers: &[u8], i: usize) -> u8 {
    kickers.get(i).copied().unwrap_or(0)
}

/// Find the highest straight from a rank bitmask.
/// Returns the rank of the straight's top card; the wheel (A-2-3-4-5) tops at 5.
fn find_straight(rank_bits: u16) -> Option<u8> {
    for high in (4..13u8).rev() {
        let mask = 0b11111u16 << (high - 4);
        if rank_bits & mask == mask {
            return Some(high);
        }
    }

    let wheel = 0b1_0000_0000_1111u16;
    if rank_bits & wheel == wheel {
        Some(RANK_5)
    } else {
        None
    }
}
