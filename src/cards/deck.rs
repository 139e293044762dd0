//! The 40-card Truco deck.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::error::EngineError;

/// Number of cards in a Truco deck (10 ranks x 4 suits).
pub const DECK_SIZE: usize = 40;

/// An ordered deck. Cards are drawn from the front.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled deck, rank-major in strength order.
    #[must_use]
    pub fn standard() -> Self {
        let cards = Rank::ALL
            .into_iter()
            .flat_map(|rank| Suit::ALL.into_iter().map(move |suit| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    /// Standard deck permuted with the caller's RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// Use a caller-arranged order.
    ///
    /// Fails unless `cards` is exactly the 40 distinct Truco cards.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, EngineError> {
        if cards.len() != DECK_SIZE {
            return Err(EngineError::config(format!(
                "deck must have {DECK_SIZE} cards, got {}",
                cards.len()
            )));
        }
        let mut seen = [false; DECK_SIZE];
        for card in &cards {
            let slot = &mut seen[card_slot(*card)];
            if *slot {
                return Err(EngineError::config(format!("duplicate card {card} in deck")));
            }
            *slot = true;
        }
        Ok(Self { cards })
    }

    /// Take the next card off the front.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards in draw order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

fn card_slot(card: Card) -> usize {
    card.rank.strength() as usize * Suit::ALL.len() + card.suit.rank_index() as usize
}
