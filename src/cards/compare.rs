//! Manilha derivation and card comparison.
//!
//! Comparison precedence, applied in this order:
//! 1. Both manilhas: the stronger manilha suit wins.
//! 2. One manilha: it wins.
//! 3. Different nominal ranks: the higher rank wins.
//! 4. Same nominal rank: the stronger suit wins.
//!
//! Distinct cards therefore never tie.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};

/// The four trump cards of a deal, derived from the vira.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Manilhas {
    rank: Rank,
}

impl Manilhas {
    /// Manilhas for a revealed vira: the rank after the vira's rank.
    ///
    /// ```
    /// use truco_engine::cards::{Card, Manilhas, Rank, Suit};
    ///
    /// let manilhas = Manilhas::from_vira(Card::new(Rank::Four, Suit::Spades));
    /// assert_eq!(manilhas.rank(), Rank::Five);
    /// assert_eq!(manilhas.cards()[0], Card::new(Rank::Five, Suit::Clubs));
    /// assert_eq!(manilhas.cards()[3], Card::new(Rank::Five, Suit::Diamonds));
    /// ```
    #[must_use]
    pub const fn from_vira(vira: Card) -> Self {
        Self {
            rank: vira.rank.next(),
        }
    }

    /// The trump rank.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// The four manilhas, strongest first.
    #[must_use]
    pub fn cards(&self) -> [Card; 4] {
        Suit::ALL.map(|suit| Card::new(self.rank, suit))
    }

    /// Position in the manilha order (0 = strongest), or `None` for a
    /// non-trump card.
    #[must_use]
    pub fn position(&self, card: Card) -> Option<usize> {
        (card.rank == self.rank).then(|| card.suit.rank_index() as usize)
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        card.rank == self.rank
    }
}

/// Which of the two compared cards takes the trick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    FirstWins,
    SecondWins,
}

/// Compare `first` against `second` under `manilhas`.
///
/// Comparing a card with itself reports `SecondWins`; a deal never puts the
/// same card on the table twice.
#[must_use]
pub fn compare(first: Card, second: Card, manilhas: &Manilhas) -> Comparison {
    let first_wins = match (manilhas.position(first), manilhas.position(second)) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) if first.rank != second.rank => first.rank > second.rank,
        (None, None) => first.suit.outranks(second.suit),
    };
    if first_wins {
        Comparison::FirstWins
    } else {
        Comparison::SecondWins
    }
}

/// Total-order strength key consistent with [`compare`].
///
/// Larger is stronger. Non-trumps occupy `0..40`, manilhas `40..44`.
#[must_use]
pub fn strength(card: Card, manilhas: &Manilhas) -> u8 {
    let suit_bonus = (Suit::ALL.len() - 1) as u8 - card.suit.rank_index();
    if manilhas.contains(card) {
        40 + suit_bonus
    } else {
        card.rank.strength() * Suit::ALL.len() as u8 + suit_bonus
    }
}
