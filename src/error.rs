//! Engine error taxonomy.
//!
//! Every mutating operation returns `Result<_, EngineError>`. Nothing is
//! retried or repaired inside the engine; callers decide whether to retry,
//! substitute a default action, forfeit, or drop the match.

use thiserror::Error;

use crate::cards::Card;
use crate::core::Team;
use crate::rules::{BetLevel, Phase};

/// Top-level engine failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The action is illegal in the current state.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The card is not in the acting team's hand.
    #[error("invalid move: {card} is not in {team}'s hand")]
    InvalidMove { team: Team, card: Card },

    /// Malformed external input (unknown bet level, bad card notation,
    /// bad deck or config).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl EngineError {
    pub(crate) fn config(detail: impl Into<String>) -> Self {
        Self::InvalidConfiguration(detail.into())
    }

    /// True for protocol errors (as opposed to bad moves or bad input).
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }
}

/// Why an action was rejected by the state machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: Team, actual: Team },

    #[error("cannot bet {requested}: next allowed level is {}", level_name(.expected))]
    InvalidEscalation {
        expected: Option<BetLevel>,
        requested: BetLevel,
    },

    #[error("no bet is pending a response")]
    NothingPending,

    #[error("betting round is already complete")]
    BettingClosed,

    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("{0} already has a card on the table")]
    CardAlreadyPlayed(Team),

    #[error("trick needs a card from both teams before it can be resolved")]
    TrickIncomplete,

    #[error("a deal is already in progress")]
    DealInProgress,

    #[error("the match is finished")]
    MatchFinished,

    #[error("no deal has been dealt")]
    NoActiveDeal,
}

fn level_name(level: &Option<BetLevel>) -> String {
    level.map_or_else(|| "none".to_string(), |l| l.to_string())
}
