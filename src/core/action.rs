//! Actions an agent can submit.
//!
//! Closed enums: a betting decision is exactly one of bet/accept/run/pass and
//! a play decision is exactly one card, so malformed actions cannot be
//! constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;
use crate::rules::BetLevel;

/// A decision during a betting round.
///
/// ## Example
///
/// ```
/// use truco_engine::core::BetAction;
/// use truco_engine::rules::BetLevel;
///
/// let raise = BetAction::Bet(BetLevel::Six);
/// assert_eq!(raise.to_string(), "bet six");
/// assert!(raise.is_bet());
/// assert!(!BetAction::Pass.is_bet());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "level", rename_all = "lowercase")]
pub enum BetAction {
    /// Raise to this level.
    Bet(BetLevel),
    /// Accept the pending raise.
    Accept,
    /// Refuse the pending raise and concede the deal.
    Run,
    /// Decline to raise (accepts a pending raise).
    Pass,
}

impl BetAction {
    #[must_use]
    pub fn is_bet(&self) -> bool {
        matches!(self, BetAction::Bet(_))
    }
}

impl fmt::Display for BetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetAction::Bet(level) => write!(f, "bet {level}"),
            BetAction::Accept => f.write_str("accept"),
            BetAction::Run => f.write_str("run"),
            BetAction::Pass => f.write_str("pass"),
        }
    }
}

/// A decision during the playing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayAction {
    Play(Card),
}

impl PlayAction {
    #[must_use]
    pub fn card(&self) -> Card {
        match *self {
            PlayAction::Play(card) => card,
        }
    }
}

impl From<Card> for PlayAction {
    fn from(card: Card) -> Self {
        PlayAction::Play(card)
    }
}
