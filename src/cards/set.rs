//! Set of cards keyed by card identity.
//!
//! `CardSet` is a 52-bit mask. Membership, insertion and removal are O(1),
//! which is what the deck and zone bookkeeping rely on.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use super::card::{Card, NUM_CARDS};

const FULL_MASK: u64 = (1u64 << NUM_CARDS) - 1;

/// A set of distinct cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CardSet {
    mask: u64,
}

impl CardSet {
    pub const EMPTY: Self = Self { mask: 0 };

    /// The full 52-card universe.
    pub fn full() -> Self {
        Self { mask: FULL_MASK }
    }

    /// Insert a card. Returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.id();
        let absent = self.mask & bit == 0;
        self.mask |= bit;
        absent
    }

    /// Remove a card. Returns `false` if it was not present.
    #[inline]
    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1u64 << card.id();
        let present = self.mask & bit != 0;
        self.mask &= !bit;
        present
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.mask & (1u64 << card.id()) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn union(&self, other: &CardSet) -> CardSet {
        Self {
            mask: self.mask | other.mask,
        }
    }

    pub fn intersection(&self, other: &CardSet) -> CardSet {
        Self {
            mask: self.mask & other.mask,
        }
    }

    pub fn difference(&self, other: &CardSet) -> CardSet {
        Self {
            mask: self.mask & !other.mask,
        }
    }

    pub fn is_disjoint(&self, other: &CardSet) -> bool {
        self.mask & other.mask == 0
    }

    /// Cards in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Card> {
        let mut mask = self.mask;
        std::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let id = mask.trailing_zeros() as u8;
            mask &= mask - 1;
            Some(Card::from_id(id))
        })
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.iter().collect()
    }

    /// Remove `n` cards chosen uniformly without replacement.
    ///
    /// Returns `None` and leaves the set untouched if fewer than `n` remain.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Option<Vec<Card>> {
        if n > self.len() {
            return None;
        }
        let mut pool = self.to_vec();
        let (drawn, _) = pool.partial_shuffle(rng, n);
        let drawn = drawn.to_vec();
        for &card in &drawn {
            self.remove(card);
        }
        Some(drawn)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::EMPTY;
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl<'a> FromIterator<&'a Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardSet({} cards)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_full_and_empty() {
        assert_eq!(CardSet::full().len(), 52);
        assert!(CardSet::EMPTY.is_empty());
        assert_eq!(CardSet::full().iter().count(), 52);
    }

    #[test]
    fn test_insert_remove() {
        let mut set = CardSet::EMPTY;
        assert!(set.insert(card("As")));
        assert!(!set.insert(card("As")));
        assert!(set.contains(card("As")));
        assert_eq!(set.len(), 1);

        assert!(set.remove(card("As")));
        assert!(!set.remove(card("As")));
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_algebra() {
        let a: CardSet = [card("As"), card("Kd")].iter().collect();
        let b: CardSet = [card("Kd"), card("2c")].iter().collect();
        assert_eq!(a.union(&b).len(), 3);
        assert_eq!(a.intersection(&b).to_vec(), vec![card("Kd")]);
        assert_eq!(a.difference(&b).to_vec(), vec![card("As")]);
        assert!(!a.is_disjoint(&b));
        assert!(a.difference(&b).is_disjoint(&b));
    }

    #[test]
    fn test_iter_is_ascending() {
        let set: CardSet = [card("As"), card("2c"), card("7h")].iter().collect();
        let ids: Vec<u8> = set.iter().map(|c| c.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = CardSet::full();
        let drawn = deck.draw(5, &mut rng).unwrap();
        assert_eq!(drawn.len(), 5);
        assert_eq!(deck.len(), 47);
        let drawn_set: CardSet = drawn.iter().collect();
        assert_eq!(drawn_set.len(), 5);
        assert!(drawn_set.is_disjoint(&deck));
    }

    #[test]
    fn test_draw_too_many_leaves_set_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut small: CardSet = [card("As"), card("Ks")].iter().collect();
        assert!(small.draw(3, &mut rng).is_none());
        assert_eq!(small.len(), 2);
    }
}
