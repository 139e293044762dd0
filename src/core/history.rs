//! Structured record of everything that happened in a match.
//!
//! The engine appends one `MatchEvent` per state change to an
//! `im::Vector`, so cloning an engine (e.g. for an agent's lookahead) does
//! not copy the history. Turning events into transcripts or files is left to
//! callers.

use serde::{Deserialize, Serialize};

use super::action::BetAction;
use super::team::{Team, TeamMap};
use crate::cards::Card;
use crate::rules::{BettingStep, Hand};

/// Why a deal ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealEnd {
    /// A team took two tricks.
    Tricks,
    /// A team ran from a raise.
    RanAway,
}

/// One entry in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    DealStarted {
        deal: u32,
        vira: Card,
        manilhas: [Card; 4],
        hands: TeamMap<Hand>,
    },
    BettingAction {
        deal: u32,
        team: Team,
        action: BetAction,
        step: BettingStep,
    },
    CardPlayed {
        deal: u32,
        trick: u8,
        team: Team,
        card: Card,
    },
    TrickResolved {
        deal: u32,
        trick: u8,
        cards: TeamMap<Card>,
        winner: Team,
    },
    DealEnded {
        deal: u32,
        winner: Team,
        points: u32,
        reason: DealEnd,
        scores: TeamMap<u32>,
    },
    Forfeited {
        team: Team,
    },
    MatchEnded {
        winner: Team,
        scores: TeamMap<u32>,
    },
}

impl MatchEvent {
    /// Deal number the event belongs to, if it is deal-scoped.
    #[must_use]
    pub fn deal(&self) -> Option<u32> {
        match *self {
            MatchEvent::DealStarted { deal, .. }
            | MatchEvent::BettingAction { deal, .. }
            | MatchEvent::CardPlayed { deal, .. }
            | MatchEvent::TrickResolved { deal, .. }
            | MatchEvent::DealEnded { deal, .. } => Some(deal),
            MatchEvent::Forfeited { .. } | MatchEvent::MatchEnded { .. } => None,
        }
    }
}
