//! The evaluator capability consumed by the simulation engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::HandCategory;
use crate::cards::Card;

/// A totally ordered hand score. Lower is stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(pub u32);

impl Score {
    /// True if this score is strictly stronger than `other`.
    #[inline]
    pub fn beats(self, other: Score) -> bool {
        self.0 < other.0
    }

    /// True if this score is at least as strong as `threshold`.
    #[inline]
    pub fn at_least(self, threshold: Score) -> bool {
        self.0 <= threshold.0
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scores hands and classifies scores into categories.
///
/// The engine only relies on this trait; any ranking that returns a total
/// order where lower is stronger can be plugged in.
pub trait Evaluator: Send + Sync {
    /// Score `hand` together with the community `board`.
    fn evaluate(&self, hand: &[Card], board: &[Card]) -> Score;

    /// Category a score belongs to.
    fn classify(&self, score: Score) -> HandCategory;

    /// Weakest score that still counts as the named category, if the name is
    /// known. Names are expected in normalized form (see `normalize_name`).
    fn threshold(&self, name: &str) -> Option<Score>;

    /// All category names `threshold` accepts.
    fn category_names(&self) -> Vec<&'static str>;
}

impl<E: Evaluator + ?Sized> Evaluator for std::sync::Arc<E> {
    fn evaluate(&self, hand: &[Card], board: &[Card]) -> Score {
        (**self).evaluate(hand, board)
    }

    fn classify(&self, score: Score) -> HandCategory {
        (**self).classify(score)
    }

    fn threshold(&self, name: &str) -> Option<Score> {
        (**self).threshold(name)
    }

    fn category_names(&self) -> Vec<&'static str> {
        (**self).category_names()
    }
}
