//! Card values: rank, suit, and their fixed strength orders.
//!
//! Both enums are declared in strength order so the derived `Ord` is the
//! game order: `Rank` weakest first (4 .. 3), `Suit` strongest first
//! (Clubs .. Diamonds).
//!
//! Text notation is rank then suit, e.g. `"4C"`, `"QH"`, `"AS"`, `"3D"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// Card rank, declared weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Queen,
    Jack,
    King,
    Ace,
    Two,
    Three,
}

impl Rank {
    /// All ranks, weakest first.
    pub const ALL: [Rank; 10] = [
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Queen,
        Rank::Jack,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::Three,
    ];

    /// Position in the strength order (0 = weakest).
    #[must_use]
    pub const fn strength(self) -> u8 {
        self as u8
    }

    /// The next rank in the cycle, wrapping from Three to Four.
    ///
    /// ```
    /// use truco_engine::cards::Rank;
    ///
    /// assert_eq!(Rank::Four.next(), Rank::Five);
    /// assert_eq!(Rank::Seven.next(), Rank::Queen);
    /// assert_eq!(Rank::Three.next(), Rank::Four);
    /// ```
    #[must_use]
    pub const fn next(self) -> Rank {
        Rank::ALL[(self as usize + 1) % Rank::ALL.len()]
    }

    const fn symbol(self) -> char {
        match self {
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Queen => 'Q',
            Rank::Jack => 'J',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
        }
    }

    fn from_symbol(symbol: char) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.symbol() == symbol.to_ascii_uppercase())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Rank {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_symbol(c)
                .ok_or_else(|| EngineError::config(format!("unknown rank '{s}'"))),
            _ => Err(EngineError::config(format!("unknown rank '{s}'"))),
        }
    }
}

/// Card suit, declared strongest to weakest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Hearts,
    Spades,
    Diamonds,
}

impl Suit {
    /// All suits, strongest first.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Hearts, Suit::Spades, Suit::Diamonds];

    /// Position in the strength order (0 = strongest).
    #[must_use]
    pub const fn rank_index(self) -> u8 {
        self as u8
    }

    /// True if `self` beats `other` in a suit tiebreak.
    #[must_use]
    pub fn outranks(self, other: Suit) -> bool {
        self < other
    }

    const fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
        }
    }

    fn from_symbol(symbol: char) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| s.symbol() == symbol.to_ascii_uppercase())
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Suit {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Suit::from_symbol(c)
                .ok_or_else(|| EngineError::config(format!("unknown suit '{s}'"))),
            _ => Err(EngineError::config(format!("unknown suit '{s}'"))),
        }
    }
}

/// An immutable (rank, suit) pair.
///
/// `Ord` here is only for stable sorting (rank, then suit). Trick
/// resolution must go through [`crate::cards::compare`], which knows about
/// manilhas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = EngineError;

    /// Parse `"<rank><suit>"`, case-insensitive.
    ///
    /// ```
    /// use truco_engine::cards::{Card, Rank, Suit};
    ///
    /// let card: Card = "qh".parse().unwrap();
    /// assert_eq!(card, Card::new(Rank::Queen, Suit::Hearts));
    /// assert!("10H".parse::<Card>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(EngineError::config(format!("malformed card '{s}'")));
        };
        let rank = Rank::from_symbol(r)
            .ok_or_else(|| EngineError::config(format!("unknown rank in card '{s}'")))?;
        let suit = Suit::from_symbol(su)
            .ok_or_else(|| EngineError::config(format!("unknown suit in card '{s}'")))?;
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        assert!(Rank::Three > Rank::Two);
        assert!(Rank::Two > Rank::Ace);
        assert!(Rank::Queen < Rank::Jack);
        assert!(Rank::Jack < Rank::King);
        assert_eq!(Rank::Four.strength(), 0);
        assert_eq!(Rank::Three.strength(), 9);
    }

    #[test]
    fn test_rank_cycle_visits_every_rank() {
        let mut rank = Rank::Four;
        let mut seen = Vec::new();
        for _ in 0..Rank::ALL.len() {
            seen.push(rank);
            rank = rank.next();
        }
        assert_eq!(rank, Rank::Four);
        assert_eq!(seen, Rank::ALL.to_vec());
    }

    #[test]
    fn test_suit_order() {
        assert!(Suit::Clubs.outranks(Suit::Hearts));
        assert!(Suit::Hearts.outranks(Suit::Spades));
        assert!(Suit::Spades.outranks(Suit::Diamonds));
        assert!(!Suit::Diamonds.outranks(Suit::Clubs));
        assert!(!Suit::Spades.outranks(Suit::Spades));
    }

    #[test]
    fn test_card_notation() {
        for rank in Rank::ALL {
            for suit in Suit::ALL {
                let card = Card::new(rank, suit);
                assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
            }
        }
        assert_eq!(" 4d ".parse::<Card>().unwrap(), Card::new(Rank::Four, Suit::Diamonds));
    }

    #[test]
    fn test_card_parse_errors() {
        for bad in ["", "4", "4X", "9C", "4CC"] {
            let err = bad.parse::<Card>().unwrap_err();
            assert!(matches!(err, EngineError::InvalidConfiguration(_)), "{bad}: {err:?}");
        }
        assert!("8".parse::<Rank>().is_err());
        assert!("Z".parse::<Suit>().is_err());
        assert_eq!("k".parse::<Rank>().unwrap(), Rank::King);
    }
}
