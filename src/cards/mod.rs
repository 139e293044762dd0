//! Card model: ranks, suits, the 40-card deck, and trump-aware comparison.
//!
//! ## Key Types
//!
//! - `Card`, `Rank`, `Suit`: immutable card values in fixed strength orders
//! - `Deck`: ordered 40-card deck, shuffled by a caller-supplied RNG
//! - `Manilhas`: the four trumps derived from the vira
//! - `compare`: the four-step trick comparison

pub mod card;
pub mod compare;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use compare::{compare, strength, Comparison, Manilhas};
pub use deck::{Deck, DECK_SIZE};
