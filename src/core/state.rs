//! Per-team observation handed to agents.
//!
//! A `PlayerView` holds only what the team is entitled to see: its own hand,
//! the opponent's card count (never the cards), and the public state of the
//! deal and match.

use serde::{Deserialize, Serialize};

use super::team::{Team, TeamMap};
use crate::cards::Card;
use crate::rules::{BetEntry, Phase};

/// Public state plus the observing team's private hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Who is looking.
    pub team: Team,
    pub phase: Phase,
    /// Current deal number (0 before the first deal).
    pub deal: u32,
    pub hand: Vec<Card>,
    /// Cards left in the opponent's hand.
    pub opponent_cards: usize,
    pub vira: Option<Card>,
    /// Manilhas, strongest first.
    pub manilhas: Option<[Card; 4]>,
    pub scores: TeamMap<u32>,
    /// Points the current deal is worth.
    pub hand_value: u32,
    pub bet_stack: Vec<BetEntry>,
    pub pending_bet: Option<BetEntry>,
    pub betting_turn: Option<Team>,
    pub table: TeamMap<Option<Card>>,
    /// Trick winners so far this deal.
    pub tricks: Vec<Team>,
}

impl PlayerView {
    #[must_use]
    pub fn my_score(&self) -> u32 {
        self.scores[self.team]
    }

    #[must_use]
    pub fn opponent_score(&self) -> u32 {
        self.scores[self.team.opponent()]
    }

    /// True if the opponent raised and this team must answer.
    #[must_use]
    pub fn must_respond(&self) -> bool {
        self.betting_turn == Some(self.team)
            && self.pending_bet.is_some_and(|bet| bet.team != self.team)
    }

    /// The card the opponent already put down this trick, if any.
    #[must_use]
    pub fn opponent_card(&self) -> Option<Card> {
        self.table[self.team.opponent()]
    }

    /// Tricks this team has taken in the current deal.
    #[must_use]
    pub fn tricks_won(&self) -> usize {
        self.tricks.iter().filter(|&&t| t == self.team).count()
    }
}
