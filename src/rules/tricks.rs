//! Tricks: the cards on the table and the per-deal winner log.
//!
//! Team A's card is always the first operand of the comparison. A deal is
//! first-to-two: once a team holds two tricks the remaining trick is never
//! played.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{compare, Card, Comparison, Manilhas};
use crate::core::{Team, TeamMap};
use crate::error::ProtocolError;

/// Cards dealt to each player per deal.
pub const HAND_SIZE: usize = 3;

/// Tricks needed to take a deal.
pub const TRICKS_TO_WIN: usize = 2;

/// A player's cards for the current deal.
pub type Hand = SmallVec<[Card; HAND_SIZE]>;

/// Winner of a trick between Team A's card and Team B's card.
#[must_use]
pub fn trick_winner(cards: TeamMap<Card>, manilhas: &Manilhas) -> Team {
    match compare(cards[Team::A], cards[Team::B], manilhas) {
        Comparison::FirstWins => Team::A,
        Comparison::SecondWins => Team::B,
    }
}

/// Cards played into the current trick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    cards: TeamMap<Option<Card>>,
}

impl Table {
    /// Put `team`'s card down. Each team plays once per trick.
    pub fn place(&mut self, team: Team, card: Card) -> Result<(), ProtocolError> {
        let slot = &mut self.cards[team];
        if slot.is_some() {
            return Err(ProtocolError::CardAlreadyPlayed(team));
        }
        *slot = Some(card);
        Ok(())
    }

    #[must_use]
    pub fn card(&self, team: Team) -> Option<Card> {
        self.cards[team]
    }

    #[must_use]
    pub fn cards(&self) -> TeamMap<Option<Card>> {
        self.cards
    }

    /// Both cards, clearing the table, or `None` (table untouched) while a
    /// card is missing.
    pub fn take_complete(&mut self) -> Option<TeamMap<Card>> {
        let (Some(a), Some(b)) = (self.cards[Team::A], self.cards[Team::B]) else {
            return None;
        };
        self.cards = TeamMap::default();
        Some(TeamMap::from_array([a, b]))
    }
}

/// Winning team of each trick resolved so far in the deal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickLog {
    winners: SmallVec<[Team; HAND_SIZE]>,
}

impl TrickLog {
    pub fn record(&mut self, winner: Team) {
        self.winners.push(winner);
    }

    #[must_use]
    pub fn winners(&self) -> &[Team] {
        &self.winners
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.winners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    /// Tricks taken by `team`.
    #[must_use]
    pub fn wins(&self, team: Team) -> usize {
        self.winners.iter().filter(|&&t| t == team).count()
    }

    /// The team that has taken the deal, if any.
    #[must_use]
    pub fn deal_winner(&self) -> Option<Team> {
        Team::ALL.into_iter().find(|&t| self.wins(t) >= TRICKS_TO_WIN)
    }
}
