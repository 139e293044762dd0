//! Decision-maker seam.
//!
//! The engine never chooses anything. An `Agent` is asked for a betting
//! action or a card whenever it is its team's turn. Real decision-makers
//! (humans, scripted bots, model-backed players) live outside this crate;
//! the two agents here exist to drive simulations and tests.

use std::collections::VecDeque;
use thiserror::Error;

use crate::cards::Card;
use crate::core::{BetAction, DealRng, PlayAction, PlayerView};

/// An agent failed to produce a decision at all.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent has no decision: {0}")]
    NoDecision(String),
}

/// Something that decides bets and plays for one team.
pub trait Agent {
    /// Short label used in logs.
    fn name(&self) -> &str {
        "agent"
    }

    /// Choose a betting action. `legal` is never empty when called.
    fn decide_bet(
        &mut self,
        view: &PlayerView,
        legal: &[BetAction],
    ) -> Result<BetAction, AgentError>;

    /// Choose a card from `view.hand`.
    fn decide_play(&mut self, view: &PlayerView) -> Result<PlayAction, AgentError>;
}

/// Picks uniformly among legal actions and cards.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: DealRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(rng: DealRng) -> Self {
        Self { rng }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(DealRng::new(seed))
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn decide_bet(
        &mut self,
        _view: &PlayerView,
        legal: &[BetAction],
    ) -> Result<BetAction, AgentError> {
        self.rng
            .choose(legal)
            .copied()
            .ok_or_else(|| AgentError::NoDecision("no legal betting action".to_string()))
    }

    fn decide_play(&mut self, view: &PlayerView) -> Result<PlayAction, AgentError> {
        self.rng
            .choose(&view.hand)
            .map(|&card| PlayAction::Play(card))
            .ok_or_else(|| AgentError::NoDecision("empty hand".to_string()))
    }
}

/// Replays fixed decision queues; errors once a queue runs dry.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    bets: VecDeque<BetAction>,
    plays: VecDeque<Card>,
}

impl ScriptedAgent {
    #[must_use]
    pub fn new(
        bets: impl IntoIterator<Item = BetAction>,
        plays: impl IntoIterator<Item = Card>,
    ) -> Self {
        Self {
            bets: bets.into_iter().collect(),
            plays: plays.into_iter().collect(),
        }
    }

    /// Decisions not yet consumed: (bets, plays).
    #[must_use]
    pub fn remaining(&self) -> (usize, usize) {
        (self.bets.len(), self.plays.len())
    }
}

impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide_bet(
        &mut self,
        _view: &PlayerView,
        _legal: &[BetAction],
    ) -> Result<BetAction, AgentError> {
        self.bets
            .pop_front()
            .ok_or_else(|| AgentError::NoDecision("betting script exhausted".to_string()))
    }

    fn decide_play(&mut self, _view: &PlayerView) -> Result<PlayAction, AgentError> {
        self.plays
            .pop_front()
            .map(PlayAction::Play)
            .ok_or_else(|| AgentError::NoDecision("play script exhausted".to_string()))
    }
}
